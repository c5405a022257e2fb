// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Kiosk storefront bot.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::ProductId;

/// The primary error type used across the Kiosk collaborator traits and core operations.
///
/// Every failure a collaborator can produce maps onto one of these variants;
/// the intake machine turns them into user-facing prompts and never lets them
/// escape a conversation.
#[derive(Debug, Error)]
pub enum KioskError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The commerce backend was unreachable or errored; retrying the same
    /// step later may succeed.
    #[error("commerce API unavailable: {message}")]
    Unavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A referenced product no longer exists on the commerce backend.
    #[error("product {id} not found")]
    NotFound { id: ProductId },

    /// A non-positive quantity was passed to the pricing calculator.
    #[error("invalid quantity {quantity}: must be positive")]
    InvalidQuantity { quantity: Decimal },

    /// The order-creation call was rejected or failed after all fields
    /// were collected.
    #[error("order submission failed: {message}")]
    SubmissionFailed {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Chat transport errors (send failure, closed inbound queue, bad ids).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
