// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Kiosk storefront bot.
//!
//! This crate provides the error taxonomy, common types, and the
//! collaborator traits used throughout the Kiosk workspace. The commerce
//! client and the chat channel adapter implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::KioskError;
pub use traits::{ChatChannel, CommerceApi};
pub use types::{ChatId, Event, Inbound, Product, ProductId, Prompt, UserId};
