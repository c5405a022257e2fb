// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callback-data codec for inline keyboard buttons.
//!
//! Telegram callback payloads are plain strings; this module is the only
//! place they are produced or parsed. Past this boundary the intake machine
//! only ever sees the closed [`Event`] type, never string tags.

use kiosk_core::types::{Choice, Event, ProductId, PromptAction};

/// Encodes a prompt action into its callback-data string.
pub fn encode(action: &PromptAction) -> String {
    match action {
        PromptAction::Cancel => "cancel".into(),
        PromptAction::Select(choice) => match choice {
            Choice::MainMenu => "menu".into(),
            Choice::Catalog => "catalog".into(),
            Choice::Contact => "contact".into(),
            Choice::About => "about".into(),
            Choice::Product(id) => format!("product:{id}"),
            Choice::Order(id) => format!("order:{id}"),
        },
    }
}

/// Decodes callback data into an event. Returns `None` for data this bot
/// never produced (e.g. buttons from an older deployment).
pub fn decode(data: &str) -> Option<Event> {
    match data {
        "cancel" => return Some(Event::Cancel),
        "menu" => return Some(Event::MenuSelect(Choice::MainMenu)),
        "catalog" => return Some(Event::MenuSelect(Choice::Catalog)),
        "contact" => return Some(Event::MenuSelect(Choice::Contact)),
        "about" => return Some(Event::MenuSelect(Choice::About)),
        _ => {}
    }

    let (tag, id) = data.split_once(':')?;
    let id = ProductId(id.parse().ok()?);
    match tag {
        "product" => Some(Event::MenuSelect(Choice::Product(id))),
        "order" => Some(Event::MenuSelect(Choice::Order(id))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_round_trips() {
        let actions = [
            PromptAction::Cancel,
            PromptAction::Select(Choice::MainMenu),
            PromptAction::Select(Choice::Catalog),
            PromptAction::Select(Choice::Contact),
            PromptAction::Select(Choice::About),
            PromptAction::Select(Choice::Product(ProductId(3))),
            PromptAction::Select(Choice::Order(ProductId(17))),
        ];

        for action in actions {
            let data = encode(&action);
            let event = decode(&data).unwrap();
            let expected = match action {
                PromptAction::Cancel => Event::Cancel,
                PromptAction::Select(choice) => Event::MenuSelect(choice),
            };
            assert_eq!(event, expected, "data: {data}");
        }
    }

    #[test]
    fn unknown_data_is_rejected() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("checkout"), None);
        assert_eq!(decode("product:"), None);
        assert_eq!(decode("product:abc"), None);
        assert_eq!(decode("basket:3"), None);
    }
}
