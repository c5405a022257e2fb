// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits: the seams between the intake core and the systems
//! it calls but does not own.

use async_trait::async_trait;

use crate::error::KioskError;
use crate::types::{ChatId, CreatedOrder, Inbound, OrderRequest, Product, ProductId, Prompt};

/// Narrow contract over the commerce backend's HTTP API.
///
/// Implementations make exactly one outbound call per method invocation;
/// retry policy, if any, belongs to the caller.
#[async_trait]
pub trait CommerceApi: Send + Sync {
    /// Lists products in backend order.
    ///
    /// Fails with [`KioskError::Unavailable`] when the backend cannot be
    /// reached or errors.
    async fn list_products(&self, limit: u32, offset: u32) -> Result<Vec<Product>, KioskError>;

    /// Fetches a single product by id.
    ///
    /// [`KioskError::NotFound`] when the product vanished is distinguished
    /// from [`KioskError::Unavailable`] so callers can tell "item no longer
    /// exists" from "try again later".
    async fn get_product(&self, id: ProductId) -> Result<Product, KioskError>;

    /// Creates an order. Fails with [`KioskError::SubmissionFailed`] when
    /// the backend rejects or cannot process the order.
    async fn create_order(&self, order: &OrderRequest) -> Result<CreatedOrder, KioskError>;
}

/// The chat transport as seen by the intake core: a source of decoded
/// events and a sink for prompts.
///
/// Everything below this seam (polling, markup rendering, callback
/// acknowledgement) belongs to the channel adapter.
#[async_trait]
pub trait ChatChannel: Send + Sync {
    /// Delivers one prompt to a chat.
    async fn send_prompt(&self, chat: ChatId, prompt: Prompt) -> Result<(), KioskError>;

    /// Waits for the next inbound event. Events are yielded in arrival
    /// order across all users; per-user ordering downstream is the
    /// dispatcher's job.
    async fn recv(&self) -> Result<Inbound, KioskError>;
}
