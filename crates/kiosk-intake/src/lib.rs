// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversational order-intake core for the Kiosk storefront bot.
//!
//! The [`IntakeEngine`] is the state machine that takes a user from browsing
//! the catalog to a submitted order: catalog navigation, the
//! name -> phone -> email -> comment collection sequence, and order
//! submission with total-price computation. The [`IntakeDispatcher`] feeds it
//! events with per-user serialization and cross-user parallelism.

pub mod dispatch;
pub mod machine;
pub mod menu;
pub mod pricing;
pub mod session;
pub mod store;
pub mod submit;

pub use dispatch::IntakeDispatcher;
pub use machine::IntakeEngine;
pub use session::{ConversationSession, IntakeState, OrderFields};
pub use store::SessionStore;
pub use submit::OrderOutcome;
