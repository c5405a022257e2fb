// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Kiosk storefront bot.
//!
//! Implements [`ChatChannel`] over the Telegram Bot API via teloxide:
//! long polling for messages and callback queries, decoding at the
//! transport boundary into the closed event type, and prompt delivery with
//! inline keyboards and product photos.

pub mod callback;
pub mod handler;

use async_trait::async_trait;
use kiosk_config::model::TelegramConfig;
use kiosk_core::error::KioskError;
use kiosk_core::traits::ChatChannel;
use kiosk_core::types::{ChatId, Inbound, Prompt};
use teloxide::prelude::*;
use teloxide::types::ChatId as TgChatId;
use teloxide::types::InputFile;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Telegram channel adapter implementing [`ChatChannel`].
///
/// Connects via long polling, decodes updates into [`Inbound`] events, and
/// renders prompts as messages with inline keyboards.
pub struct TelegramChannel {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<Inbound>>,
    inbound_tx: mpsc::Sender<Inbound>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramChannel {
    /// Creates a new Telegram channel adapter.
    ///
    /// Requires `config.bot_token` to be set and non-empty.
    pub fn new(config: &TelegramConfig) -> Result<Self, KioskError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            KioskError::Config("telegram.bot_token is required for the Telegram adapter".into())
        })?;

        if token.is_empty() {
            return Err(KioskError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let bot = Bot::new(token);
        let (inbound_tx, inbound_rx) = mpsc::channel(100);

        Ok(Self {
            bot,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
        })
    }

    /// Returns a reference to the underlying teloxide Bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Starts long polling and forwards decoded events to `recv()`.
    pub async fn connect(&mut self) -> Result<(), KioskError> {
        if self.polling_handle.is_some() {
            return Ok(()); // Already connected
        }

        let bot = self.bot.clone();
        let msg_tx = self.inbound_tx.clone();
        let query_tx = self.inbound_tx.clone();

        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let message_branch = Update::filter_message().endpoint(move |msg: Message| {
                let tx = msg_tx.clone();
                async move {
                    if !handler::is_dm(&msg) {
                        debug!(chat_id = msg.chat.id.0, "ignoring non-DM message");
                        return respond(());
                    }

                    match handler::to_inbound(&msg) {
                        Some(inbound) => {
                            if tx.send(inbound).await.is_err() {
                                warn!("inbound queue closed, dropping message");
                            }
                        }
                        None => {
                            debug!(msg_id = msg.id.0, "ignoring unsupported message type");
                        }
                    }

                    respond(())
                }
            });

            let callback_branch =
                Update::filter_callback_query().endpoint(move |bot: Bot, query: CallbackQuery| {
                    let tx = query_tx.clone();
                    async move {
                        // Acknowledge first so the client stops its spinner
                        // even when the data turns out to be stale.
                        if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
                            debug!(error = %e, "failed to answer callback query");
                        }

                        if let Some(inbound) = handler::callback_to_inbound(&query)
                            && tx.send(inbound).await.is_err()
                        {
                            warn!("inbound queue closed, dropping callback");
                        }

                        respond(())
                    }
                });

            let tree = dptree::entry()
                .branch(message_branch)
                .branch(callback_branch);

            Dispatcher::builder(bot, tree)
                .default_handler(|_| async {}) // Silently ignore other update kinds
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }
}

#[async_trait]
impl ChatChannel for TelegramChannel {
    async fn send_prompt(&self, chat: ChatId, prompt: Prompt) -> Result<(), KioskError> {
        let chat = TgChatId(chat.0);
        let keyboard = handler::keyboard_for(&prompt);

        // Product photos carry the prompt text as their caption; a failed
        // photo send falls back to a plain text message.
        if let Some(image) = &prompt.image_url {
            match url::Url::parse(image) {
                Ok(parsed) => {
                    let mut request = self
                        .bot
                        .send_photo(chat, InputFile::url(parsed))
                        .caption(prompt.text.clone());
                    if let Some(markup) = keyboard.clone() {
                        request = request.reply_markup(markup);
                    }
                    match request.await {
                        Ok(_) => return Ok(()),
                        Err(e) => {
                            warn!(error = %e, "photo send failed, falling back to text");
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, url = %image, "invalid image URL, sending text only");
                }
            }
        }

        let mut request = self.bot.send_message(chat, prompt.text);
        if let Some(markup) = keyboard {
            request = request.reply_markup(markup);
        }
        request.await.map_err(|e| KioskError::Channel {
            message: format!("failed to send message: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(())
    }

    async fn recv(&self) -> Result<Inbound, KioskError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| KioskError::Channel {
            message: "Telegram inbound queue closed".into(),
            source: None,
        })
    }
}
