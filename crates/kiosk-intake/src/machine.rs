// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The order-intake state machine.
//!
//! [`IntakeEngine::handle`] is the single entry point: given a user identity
//! and one decoded event, it reads the session, decides the transition,
//! calls the commerce API where the transition needs data, and returns the
//! prompt to show. Every failure maps to a prompt; the engine never returns
//! an error and never panics on an unexpected event.
//!
//! An event that is not valid for the current state re-issues the current
//! state's prompt and leaves the session untouched. `Cancel` is accepted in
//! every state, discards any session, and is idempotent.

use std::sync::Arc;

use kiosk_config::model::IntakeConfig;
use kiosk_core::error::KioskError;
use kiosk_core::traits::CommerceApi;
use kiosk_core::types::{ChatId, Choice, Event, Prompt, UserId};
use tracing::{debug, info, warn};

use crate::menu;
use crate::session::{ConversationSession, IntakeState};
use crate::store::SessionStore;
use crate::submit::{self, OrderOutcome};

/// The conversational core: one instance serves all users.
///
/// The engine itself is stateless between calls; everything per-user lives
/// in the [`SessionStore`]. Callers must serialize `handle` invocations per
/// user id (the dispatcher does this); calls for different users may run
/// concurrently.
pub struct IntakeEngine {
    commerce: Arc<dyn CommerceApi>,
    store: SessionStore,
    intake: IntakeConfig,
    page_size: u32,
}

impl IntakeEngine {
    pub fn new(
        commerce: Arc<dyn CommerceApi>,
        store: SessionStore,
        intake: IntakeConfig,
        page_size: u32,
    ) -> Self {
        Self {
            commerce,
            store,
            intake,
            page_size,
        }
    }

    /// The session store backing this engine.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Processes one inbound event and returns the prompt to deliver.
    pub async fn handle(&self, user_id: UserId, chat_id: ChatId, event: Event) -> Prompt {
        let mut session = self
            .store
            .get(user_id)
            .unwrap_or_else(|| ConversationSession::new(user_id, chat_id));
        // The user may message from a different chat; prompts follow them.
        session.chat_id = chat_id;

        debug!(user_id = %user_id, state = %session.state, ?event, "handling intake event");

        match event {
            Event::Cancel => {
                self.store.remove(user_id);
                debug!(user_id = %user_id, "conversation cancelled");
                menu::main_menu(&self.intake)
            }
            Event::MenuSelect(choice) => self.handle_choice(session, choice).await,
            Event::TextReply(text) => self.handle_text(session, text).await,
        }
    }

    /// Clears the user's session after idle expiry. Callers must hold the
    /// same per-user serialization as [`handle`].
    pub(crate) fn expire(&self, user_id: UserId) {
        if self.store.get(user_id).is_some() {
            self.store.remove(user_id);
            info!(user_id = %user_id, "idle conversation expired");
        }
    }

    async fn handle_choice(&self, mut session: ConversationSession, choice: Choice) -> Prompt {
        use IntakeState::*;

        match (session.state, choice) {
            // Idle: menu navigation. Only opening the catalog creates state.
            (Idle, Choice::Catalog) => self.catalog_for(session).await,
            (Idle, Choice::Contact) => menu::contact_card(&self.intake),
            (Idle, Choice::About) => menu::about_card(&self.intake),
            (Idle, Choice::MainMenu) => menu::main_menu(&self.intake),

            // Browsing: select a product, retry the catalog, or leave.
            (BrowsingCatalog, Choice::Product(id)) => {
                match self.commerce.get_product(id).await {
                    Ok(product) => {
                        session.state = ViewingProduct;
                        session.selected_product_id = Some(id);
                        self.store.upsert(session);
                        menu::product_card(&product)
                    }
                    Err(KioskError::NotFound { id }) => {
                        debug!(product_id = %id, "selected product vanished, re-routing to catalog");
                        menu::product_gone(self.catalog_for(session).await)
                    }
                    Err(e) => {
                        warn!(product_id = %id, error = %e, "product fetch failed");
                        menu::product_unavailable()
                    }
                }
            }
            (BrowsingCatalog, Choice::Catalog) => self.catalog_for(session).await,
            (BrowsingCatalog, Choice::MainMenu) => {
                self.store.remove(session.user_id);
                menu::main_menu(&self.intake)
            }

            // Viewing: start the order, step back, or leave.
            (ViewingProduct, Choice::Order(id)) => {
                session.selected_product_id = Some(id);
                session.state = AwaitingName;
                self.store.upsert(session);
                menu::ask_name()
            }
            (ViewingProduct, Choice::Catalog) => {
                session.state = BrowsingCatalog;
                session.selected_product_id = None;
                self.catalog_for(session).await
            }
            (ViewingProduct, Choice::MainMenu) => {
                self.store.remove(session.user_id);
                menu::main_menu(&self.intake)
            }

            // Anything else is invalid for the state: re-issue the current
            // prompt, mutate nothing.
            (state, choice) => {
                debug!(state = %state, ?choice, "ignoring invalid menu selection");
                self.reprompt(&session).await
            }
        }
    }

    async fn handle_text(&self, mut session: ConversationSession, text: String) -> Prompt {
        use IntakeState::*;

        let reply = text.trim();

        match session.state {
            // Free text is not meaningful outside field collection.
            Idle | BrowsingCatalog | ViewingProduct => {
                debug!(state = %session.state, "ignoring free text outside collection");
                self.reprompt(&session).await
            }

            AwaitingName => {
                if reply.is_empty() {
                    return menu::ask_name();
                }
                session.fields.name = Some(reply.to_string());
                session.state = AwaitingPhone;
                self.store.upsert(session);
                menu::ask_phone()
            }

            AwaitingPhone => {
                if reply.is_empty() {
                    return menu::ask_phone();
                }
                session.fields.phone = Some(reply.to_string());
                session.state = AwaitingEmail;
                self.store.upsert(session);
                menu::ask_email()
            }

            AwaitingEmail => {
                if reply.is_empty() {
                    return menu::ask_email();
                }
                if !reply.contains('@') {
                    return menu::invalid_email();
                }
                session.fields.email = Some(reply.to_string());
                session.state = AwaitingComment;
                self.store.upsert(session);
                menu::ask_comment(&self.intake.skip_token)
            }

            AwaitingComment => {
                if reply.is_empty() {
                    return menu::ask_comment(&self.intake.skip_token);
                }
                let comment = if reply.eq_ignore_ascii_case(&self.intake.skip_token) {
                    String::new()
                } else {
                    reply.to_string()
                };
                session.fields.comment = Some(comment);

                let outcome = submit::submit_order(self.commerce.as_ref(), &session).await;
                // Terminal either way: the session is gone, the user is
                // back at the main menu on their next event.
                self.store.remove(session.user_id);

                match outcome {
                    OrderOutcome::Submitted { order_id, total } => {
                        menu::order_submitted(order_id, &crate::pricing::format_price(total))
                    }
                    OrderOutcome::Rejected { .. } => menu::order_failed(),
                }
            }
        }
    }

    /// Rebuilds the current state's prompt without mutating the session.
    async fn reprompt(&self, session: &ConversationSession) -> Prompt {
        use IntakeState::*;

        match session.state {
            Idle => menu::main_menu(&self.intake),
            BrowsingCatalog => match self.list_page().await {
                Ok(products) if products.is_empty() => menu::empty_catalog(),
                Ok(products) => menu::catalog_page(&products),
                Err(e) => {
                    warn!(error = %e, "catalog re-display failed");
                    menu::catalog_unavailable()
                }
            },
            ViewingProduct => {
                let Some(id) = session.selected_product_id else {
                    return menu::product_unavailable();
                };
                match self.commerce.get_product(id).await {
                    Ok(product) => menu::product_card(&product),
                    Err(e) => {
                        warn!(product_id = %id, error = %e, "product re-display failed");
                        menu::product_unavailable()
                    }
                }
            }
            AwaitingName => menu::ask_name(),
            AwaitingPhone => menu::ask_phone(),
            AwaitingEmail => menu::ask_email(),
            AwaitingComment => menu::ask_comment(&self.intake.skip_token),
        }
    }

    /// Fetches a catalog page and settles the session accordingly: a
    /// non-empty page stores the session in `BrowsingCatalog`; an empty or
    /// unreachable catalog leaves the user without a session (idle).
    async fn catalog_for(&self, mut session: ConversationSession) -> Prompt {
        match self.list_page().await {
            Ok(products) if products.is_empty() => {
                self.store.remove(session.user_id);
                menu::empty_catalog()
            }
            Ok(products) => {
                session.state = IntakeState::BrowsingCatalog;
                self.store.upsert(session);
                menu::catalog_page(&products)
            }
            Err(e) => {
                warn!(error = %e, "catalog fetch failed");
                self.store.remove(session.user_id);
                menu::catalog_unavailable()
            }
        }
    }

    async fn list_page(&self) -> Result<Vec<kiosk_core::types::Product>, KioskError> {
        self.commerce.list_products(self.page_size, 0).await
    }
}
