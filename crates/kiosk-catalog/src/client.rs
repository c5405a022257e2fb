// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the commerce backend.
//!
//! Provides [`CommerceClient`] which handles request construction, response
//! decoding, and mapping of transport failures onto the uniform error
//! taxonomy. Each method makes exactly one outbound call; there is no
//! implicit retry, so a conversation step either succeeds or reports
//! "try again later" to the user.

use std::time::Duration;

use async_trait::async_trait;
use kiosk_config::model::CommerceConfig;
use kiosk_core::error::KioskError;
use kiosk_core::traits::CommerceApi;
use kiosk_core::types::{CreatedOrder, OrderRequest, Product, ProductId};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

/// Error body the backend sends on failed requests.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: String,
}

/// HTTP client for commerce backend communication.
///
/// Manages connection pooling and per-request timeouts. The base URL comes
/// from `[commerce]` configuration and can be overridden in tests.
#[derive(Debug, Clone)]
pub struct CommerceClient {
    client: reqwest::Client,
    base_url: String,
}

impl CommerceClient {
    /// Creates a new commerce API client from configuration.
    pub fn new(config: &CommerceConfig) -> Result<Self, KioskError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KioskError::Unavailable {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Decodes the backend's `{"detail": "..."}` error body, falling back to
    /// the raw body text.
    fn error_detail(body: &str) -> String {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(api_err) => api_err.detail,
            Err(_) => body.to_string(),
        }
    }
}

#[async_trait]
impl CommerceApi for CommerceClient {
    async fn list_products(&self, limit: u32, offset: u32) -> Result<Vec<Product>, KioskError> {
        let url = format!("{}/api/products", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("skip", offset), ("limit", limit)])
            .send()
            .await
            .map_err(|e| KioskError::Unavailable {
                message: format!("product listing request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, limit, offset, "product listing response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "product listing returned error status");
            return Err(KioskError::Unavailable {
                message: format!("backend returned {status}: {}", Self::error_detail(&body)),
                source: None,
            });
        }

        response
            .json::<Vec<Product>>()
            .await
            .map_err(|e| KioskError::Unavailable {
                message: format!("failed to decode product listing: {e}"),
                source: Some(Box::new(e)),
            })
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, KioskError> {
        let url = format!("{}/api/products/{id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| KioskError::Unavailable {
                message: format!("product lookup request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, product_id = %id, "product lookup response received");

        if status == StatusCode::NOT_FOUND {
            return Err(KioskError::NotFound { id });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "product lookup returned error status");
            return Err(KioskError::Unavailable {
                message: format!("backend returned {status}: {}", Self::error_detail(&body)),
                source: None,
            });
        }

        response
            .json::<Product>()
            .await
            .map_err(|e| KioskError::Unavailable {
                message: format!("failed to decode product: {e}"),
                source: Some(Box::new(e)),
            })
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<CreatedOrder, KioskError> {
        let url = format!("{}/api/orders", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(|e| KioskError::SubmissionFailed {
                message: format!("order creation request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, product_id = %order.product_id, "order creation response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "order creation returned error status");
            return Err(KioskError::SubmissionFailed {
                message: format!("backend returned {status}: {}", Self::error_detail(&body)),
                source: None,
            });
        }

        response
            .json::<CreatedOrder>()
            .await
            .map_err(|e| KioskError::SubmissionFailed {
                message: format!("failed to decode created order: {e}"),
                source: Some(Box::new(e)),
            })
    }
}
