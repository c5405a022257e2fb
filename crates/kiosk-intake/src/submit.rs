// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order assembly and submission.
//!
//! Runs once per completed conversation, on the terminal event: the current
//! unit price is re-fetched (never cached from selection time), the total is
//! computed, and exactly one order-creation call is made. There is no
//! automatic retry; the caller clears the session regardless of outcome.

use kiosk_core::error::KioskError;
use kiosk_core::traits::CommerceApi;
use kiosk_core::types::OrderRequest;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::pricing::compute_total;
use crate::session::ConversationSession;

/// Orders are placed for one natural unit of the product; a
/// quantity-collection step would change this per conversation.
const ORDER_QUANTITY: Decimal = Decimal::ONE;

/// The terminal outcome of a conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    /// The backend accepted the order.
    Submitted { order_id: i64, total: Decimal },
    /// The order could not be placed; the reason is for the log, not the user.
    Rejected { reason: String },
}

/// Assembles the collected fields into an [`OrderRequest`] and submits it.
///
/// Returns `Rejected` instead of an error for every failure mode: a
/// conversation that reached this point always ends with a user-facing
/// outcome, never a crash.
pub async fn submit_order(
    commerce: &dyn CommerceApi,
    session: &ConversationSession,
) -> OrderOutcome {
    let (Some(product_id), Some(name), Some(phone), Some(email)) = (
        session.selected_product_id,
        session.fields.name.as_deref(),
        session.fields.phone.as_deref(),
        session.fields.email.as_deref(),
    ) else {
        // Unreachable when the machine's state invariant holds.
        warn!(user_id = %session.user_id, state = %session.state, "submission with incomplete session");
        return OrderOutcome::Rejected {
            reason: "incomplete session".into(),
        };
    };

    // Re-fetch the product so the price reflects the backend's current value.
    let product = match commerce.get_product(product_id).await {
        Ok(product) => product,
        Err(KioskError::NotFound { id }) => {
            warn!(user_id = %session.user_id, product_id = %id, "product vanished before submission");
            return OrderOutcome::Rejected {
                reason: format!("product {id} no longer exists"),
            };
        }
        Err(e) => {
            warn!(user_id = %session.user_id, error = %e, "price re-fetch failed");
            return OrderOutcome::Rejected {
                reason: format!("price re-fetch failed: {e}"),
            };
        }
    };

    let total = match compute_total(product.unit_price, ORDER_QUANTITY) {
        Ok(total) => total,
        Err(e) => {
            warn!(user_id = %session.user_id, error = %e, "total computation rejected");
            return OrderOutcome::Rejected {
                reason: format!("total computation rejected: {e}"),
            };
        }
    };

    let order = OrderRequest {
        customer_name: name.to_string(),
        customer_email: email.to_string(),
        customer_phone: phone.to_string(),
        product_id,
        quantity_sqm: ORDER_QUANTITY,
        message: session.fields.comment.clone().unwrap_or_default(),
        source: "telegram".into(),
    };

    match commerce.create_order(&order).await {
        Ok(created) => {
            info!(
                user_id = %session.user_id,
                order_id = created.id,
                product_id = %product_id,
                total = %total,
                "order submitted"
            );
            OrderOutcome::Submitted {
                order_id: created.id,
                total,
            }
        }
        Err(e) => {
            warn!(user_id = %session.user_id, product_id = %product_id, error = %e, "order submission failed");
            OrderOutcome::Rejected {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::IntakeState;
    use kiosk_core::types::{ChatId, Product, ProductId, UserId};
    use kiosk_test_utils::MockCommerce;

    fn product(id: i64, price: Decimal) -> Product {
        Product {
            id: ProductId(id),
            name: "Corrugated sheet C8".into(),
            description: "Universal profile.".into(),
            unit_price: price,
            category: "Roofing".into(),
            image_url: None,
            specifications: None,
        }
    }

    fn complete_session(product_id: i64) -> ConversationSession {
        let mut session = ConversationSession::new(UserId(1), ChatId(1));
        session.state = IntakeState::AwaitingComment;
        session.selected_product_id = Some(ProductId(product_id));
        session.fields.name = Some("A".into());
        session.fields.phone = Some("B".into());
        session.fields.email = Some("c@d.e".into());
        session.fields.comment = Some(String::new());
        session
    }

    #[tokio::test]
    async fn submits_one_order_with_unit_quantity_and_refetched_price() {
        let commerce = MockCommerce::with_products(vec![product(3, Decimal::new(4500, 1))]);
        let outcome = submit_order(&commerce, &complete_session(3)).await;

        assert_eq!(
            outcome,
            OrderOutcome::Submitted {
                order_id: 1,
                total: Decimal::new(4500, 1),
            }
        );

        let orders = commerce.orders().await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].customer_name, "A");
        assert_eq!(orders[0].customer_phone, "B");
        assert_eq!(orders[0].customer_email, "c@d.e");
        assert_eq!(orders[0].quantity_sqm, Decimal::ONE);
        assert_eq!(orders[0].message, "");
        assert_eq!(orders[0].source, "telegram");
    }

    #[tokio::test]
    async fn vanished_product_is_rejected_without_an_order_call() {
        let commerce = MockCommerce::new();
        let outcome = submit_order(&commerce, &complete_session(3)).await;

        assert!(matches!(outcome, OrderOutcome::Rejected { .. }));
        assert_eq!(commerce.order_count().await, 0);
    }

    #[tokio::test]
    async fn backend_rejection_maps_to_rejected_outcome() {
        let commerce = MockCommerce::with_products(vec![product(3, Decimal::new(4500, 1))]);
        commerce.set_orders_failing(true);

        let outcome = submit_order(&commerce, &complete_session(3)).await;
        assert!(matches!(outcome, OrderOutcome::Rejected { .. }));
    }

    #[tokio::test]
    async fn incomplete_session_is_rejected_without_an_order_call() {
        let commerce = MockCommerce::with_products(vec![product(3, Decimal::new(4500, 1))]);
        let mut session = complete_session(3);
        session.fields.email = None;

        let outcome = submit_order(&commerce, &session).await;
        assert!(matches!(outcome, OrderOutcome::Rejected { .. }));
        assert_eq!(commerce.order_count().await, 0);
    }
}
