// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Kiosk workspace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Chat-transport identity of a user; the aggregate key for conversation sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies the chat a prompt should be delivered to. In direct messages
/// this coincides with the user id, but the two are kept distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque product identifier assigned by the commerce backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog product as served by the commerce API. Read-only to the bot.
///
/// The backend prices per square metre, hence the `price_per_sqm` wire name.
/// Fields the bot does not consume (`video_url`, `is_available`, timestamps)
/// are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[serde(rename = "price_per_sqm")]
    pub unit_price: Decimal,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub specifications: Option<String>,
}

/// Order-creation payload for `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub product_id: ProductId,
    pub quantity_sqm: Decimal,
    pub message: String,
    pub source: String,
}

/// The order object the commerce backend returns on creation. The backend
/// computes `total_price` itself from the current unit price.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedOrder {
    pub id: i64,
    pub total_price: Decimal,
    pub status: String,
}

/// The closed set of selectable menu actions.
///
/// Decoded once at the transport boundary; past that point the intake
/// machine only ever switches over these variants, never over raw
/// callback strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Return to (or re-show) the main menu.
    MainMenu,
    /// Open the product catalog.
    Catalog,
    /// Show the contact card.
    Contact,
    /// Show the about card.
    About,
    /// Open a single product's detail view.
    Product(ProductId),
    /// Start the order flow for a product.
    Order(ProductId),
}

/// A single inbound occurrence the intake machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A menu option was selected (button press).
    MenuSelect(Choice),
    /// A free-text reply.
    TextReply(String),
    /// Explicit reset; unconditionally abandons any in-progress order.
    Cancel,
}

/// An event paired with the identity it arrived from.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub event: Event,
}

/// The action behind one prompt button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Select(Choice),
    Cancel,
}

/// One selectable button offered by a prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptOption {
    pub label: String,
    pub action: PromptAction,
}

/// What the intake core asks the channel to show: display text, the
/// options valid from the current state, and an optional product photo.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub text: String,
    pub options: Vec<PromptOption>,
    pub image_url: Option<String>,
}

impl Prompt {
    /// A prompt with text only and no buttons.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
            image_url: None,
        }
    }

    /// Appends a button wired to a menu choice.
    pub fn option(mut self, label: impl Into<String>, choice: Choice) -> Self {
        self.options.push(PromptOption {
            label: label.into(),
            action: PromptAction::Select(choice),
        });
        self
    }

    /// Appends a cancel button.
    pub fn cancel_option(mut self, label: impl Into<String>) -> Self {
        self.options.push(PromptOption {
            label: label.into(),
            action: PromptAction::Cancel,
        });
        self
    }

    /// Attaches a product photo URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}
