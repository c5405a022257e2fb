// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock commerce API for deterministic testing.
//!
//! `MockCommerce` implements `CommerceApi` over an in-memory product list
//! with switchable failure modes, and logs every order-creation call for
//! assertion in tests.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use kiosk_core::error::KioskError;
use kiosk_core::traits::CommerceApi;
use kiosk_core::types::{CreatedOrder, OrderRequest, Product, ProductId};

/// A scriptable in-memory commerce backend.
///
/// Mirrors the real backend's behavior: listings come back in insertion
/// order, lookups of absent ids are `NotFound`, and order creation computes
/// the total from the current unit price. Failure toggles turn each
/// operation into its taxonomy error.
pub struct MockCommerce {
    products: Arc<Mutex<Vec<Product>>>,
    orders: Arc<Mutex<Vec<OrderRequest>>>,
    next_order_id: AtomicI64,
    listing_unavailable: AtomicBool,
    lookup_unavailable: AtomicBool,
    orders_failing: AtomicBool,
}

impl MockCommerce {
    /// An empty backend: no products, all operations healthy.
    pub fn new() -> Self {
        Self {
            products: Arc::new(Mutex::new(Vec::new())),
            orders: Arc::new(Mutex::new(Vec::new())),
            next_order_id: AtomicI64::new(1),
            listing_unavailable: AtomicBool::new(false),
            lookup_unavailable: AtomicBool::new(false),
            orders_failing: AtomicBool::new(false),
        }
    }

    /// A backend pre-stocked with the given products.
    pub fn with_products(products: Vec<Product>) -> Self {
        let mock = Self::new();
        *mock.products.try_lock().expect("fresh mock is uncontended") = products;
        mock
    }

    /// Removes a product, as if it vanished from the backend.
    pub async fn remove_product(&self, id: ProductId) {
        self.products.lock().await.retain(|p| p.id != id);
    }

    /// Makes `list_products` fail with `Unavailable`.
    pub fn set_listing_unavailable(&self, failing: bool) {
        self.listing_unavailable.store(failing, Ordering::SeqCst);
    }

    /// Makes `get_product` fail with `Unavailable`.
    pub fn set_lookup_unavailable(&self, failing: bool) {
        self.lookup_unavailable.store(failing, Ordering::SeqCst);
    }

    /// Makes `create_order` fail with `SubmissionFailed`.
    pub fn set_orders_failing(&self, failing: bool) {
        self.orders_failing.store(failing, Ordering::SeqCst);
    }

    /// Every order-creation payload received so far, in call order.
    pub async fn orders(&self) -> Vec<OrderRequest> {
        self.orders.lock().await.clone()
    }

    /// Number of order-creation calls received.
    pub async fn order_count(&self) -> usize {
        self.orders.lock().await.len()
    }
}

impl Default for MockCommerce {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommerceApi for MockCommerce {
    async fn list_products(&self, limit: u32, offset: u32) -> Result<Vec<Product>, KioskError> {
        if self.listing_unavailable.load(Ordering::SeqCst) {
            return Err(KioskError::Unavailable {
                message: "mock listing unavailable".into(),
                source: None,
            });
        }
        let products = self.products.lock().await;
        Ok(products
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, KioskError> {
        if self.lookup_unavailable.load(Ordering::SeqCst) {
            return Err(KioskError::Unavailable {
                message: "mock lookup unavailable".into(),
                source: None,
            });
        }
        self.products
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(KioskError::NotFound { id })
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<CreatedOrder, KioskError> {
        if self.orders_failing.load(Ordering::SeqCst) {
            return Err(KioskError::SubmissionFailed {
                message: "mock order rejection".into(),
                source: None,
            });
        }

        // The backend recomputes the total from its current price.
        let unit_price = self
            .products
            .lock()
            .await
            .iter()
            .find(|p| p.id == order.product_id)
            .map(|p| p.unit_price)
            .ok_or_else(|| KioskError::SubmissionFailed {
                message: format!("product {} not found", order.product_id),
                source: None,
            })?;

        self.orders.lock().await.push(order.clone());
        Ok(CreatedOrder {
            id: self.next_order_id.fetch_add(1, Ordering::SeqCst),
            total_price: unit_price * order.quantity_sqm,
            status: "pending".into(),
        })
    }
}
