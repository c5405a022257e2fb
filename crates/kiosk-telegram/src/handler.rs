// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport-boundary decoding and keyboard rendering.
//!
//! Incoming Telegram messages and callback queries are decoded here, once,
//! into the channel-agnostic [`Inbound`] event; outgoing prompts get their
//! inline keyboards built here from the options the machine attached.

use kiosk_core::types::{ChatId, Choice, Event, Inbound, Prompt, UserId};
use teloxide::types::{CallbackQuery, ChatKind, InlineKeyboardButton, InlineKeyboardMarkup, Message};
use tracing::debug;

use crate::callback;

/// Checks whether the message is from a private (DM) chat.
///
/// Group, supergroup, and channel messages return `false`; the storefront
/// only talks to individual customers.
pub fn is_dm(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

/// Decodes a text message body into an event.
///
/// The two commands the bot understands map onto machine events; any other
/// text is a free-text reply for the collection steps.
pub fn decode_text(text: &str) -> Event {
    match text.trim() {
        "/start" => Event::MenuSelect(Choice::MainMenu),
        "/cancel" => Event::Cancel,
        other => Event::TextReply(other.to_string()),
    }
}

/// Converts a Telegram message into an [`Inbound`] event.
///
/// Returns `None` for messages without a sender or without text (stickers,
/// photos from the user, etc.).
pub fn to_inbound(msg: &Message) -> Option<Inbound> {
    let user = msg.from.as_ref()?;
    let text = msg.text()?;

    Some(Inbound {
        user_id: UserId(user.id.0 as i64),
        chat_id: ChatId(msg.chat.id.0),
        event: decode_text(text),
    })
}

/// Converts a callback query into an [`Inbound`] event.
///
/// Returns `None` when the callback data is absent or not something this
/// bot produces. Prompts go to the chat the button lived in, falling back
/// to the user's own chat for inaccessible messages.
pub fn callback_to_inbound(query: &CallbackQuery) -> Option<Inbound> {
    let data = query.data.as_deref()?;
    let Some(event) = callback::decode(data) else {
        debug!(data = %data, "ignoring unrecognized callback data");
        return None;
    };

    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id.0)
        .unwrap_or(query.from.id.0 as i64);

    Some(Inbound {
        user_id: UserId(query.from.id.0 as i64),
        chat_id: ChatId(chat_id),
        event,
    })
}

/// Builds the inline keyboard for a prompt, one button per row.
///
/// Returns `None` for prompts without options so plain notices are sent
/// without an empty keyboard attached.
pub fn keyboard_for(prompt: &Prompt) -> Option<InlineKeyboardMarkup> {
    if prompt.options.is_empty() {
        return None;
    }

    let rows: Vec<Vec<InlineKeyboardButton>> = prompt
        .options
        .iter()
        .map(|option| {
            vec![InlineKeyboardButton::callback(
                option.label.clone(),
                callback::encode(&option.action),
            )]
        })
        .collect();

    Some(InlineKeyboardMarkup::new(rows))
}
