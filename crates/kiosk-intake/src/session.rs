// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user conversation session: the state-machine state plus the order
//! fields collected so far.
//!
//! The `state` field always corresponds exactly to which fields are filled:
//! `AwaitingPhone` means the name is present and nothing later is. Sessions
//! are created lazily on a user's first event and removed on a terminal
//! outcome or an explicit cancel.

use kiosk_core::types::{ChatId, ProductId, UserId};

/// States of the order-intake machine, in linear progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum IntakeState {
    /// No order in progress; main menu, contact, and about are available.
    Idle,
    /// The catalog page is showing; a product can be selected.
    BrowsingCatalog,
    /// A single product's detail is showing; an order can be started.
    ViewingProduct,
    /// Order started; waiting for the customer's name.
    AwaitingName,
    /// Name collected; waiting for the phone number.
    AwaitingPhone,
    /// Phone collected; waiting for the email address.
    AwaitingEmail,
    /// Email collected; waiting for an optional comment (or the skip token).
    AwaitingComment,
}

/// Order fields, filled strictly in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFields {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub comment: Option<String>,
}

/// The accumulated state of one user's in-progress conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    /// Aggregate key: the chat-transport identity of the user.
    pub user_id: UserId,
    /// Where prompts for this conversation are delivered.
    pub chat_id: ChatId,
    pub state: IntakeState,
    /// Set once a product is chosen; read again at submission time.
    pub selected_product_id: Option<ProductId>,
    pub fields: OrderFields,
}

impl ConversationSession {
    /// A fresh session in the idle state.
    pub fn new(user_id: UserId, chat_id: ChatId) -> Self {
        Self {
            user_id,
            chat_id,
            state: IntakeState::Idle,
            selected_product_id: None,
            fields: OrderFields::default(),
        }
    }
}
