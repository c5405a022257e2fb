// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt and keyboard builders for every state of the intake machine.
//!
//! Each builder returns the display text plus exactly the options the
//! machine accepts from that state. `Choice` values are only ever attached
//! to prompts here, which keeps "what is selectable" and "what is valid"
//! in lockstep: the machine cannot offer a button it would then reject.

use kiosk_config::model::IntakeConfig;
use kiosk_core::types::{Choice, Product, Prompt};

use crate::pricing::format_price;

/// How many characters of a product description the catalog page shows.
const CATALOG_DESCRIPTION_CHARS: usize = 100;

/// The main menu: catalog, contact, about.
pub fn main_menu(intake: &IntakeConfig) -> Prompt {
    Prompt::text(format!(
        "🏗️ Welcome to {}!\n\nWe supply quality building materials.\nChoose a section:",
        intake.company_name
    ))
    .option("🏠 Product catalog", Choice::Catalog)
    .option("📞 Contact us", Choice::Contact)
    .option("ℹ️ About us", Choice::About)
}

/// The contact card, assembled from configured company details.
pub fn contact_card(intake: &IntakeConfig) -> Prompt {
    Prompt::text(format!(
        "📞 Contact information:\n\n\
         🏢 {}\n\
         📱 Phone: {}\n\
         📧 Email: {}\n\
         🌐 Website: {}\n\
         📍 Address: {}\n\n\
         ⏰ Working hours: {}",
        intake.company_name,
        intake.contact_phone,
        intake.contact_email,
        intake.website,
        intake.address,
        intake.working_hours
    ))
    .option("🔙 Back", Choice::MainMenu)
}

/// The about card.
pub fn about_card(intake: &IntakeConfig) -> Prompt {
    Prompt::text(format!("ℹ️ About {}:\n\n{}", intake.company_name, intake.about))
        .option("🔙 Back", Choice::MainMenu)
}

/// One catalog page: a summary line per product and a select button each.
pub fn catalog_page(products: &[Product]) -> Prompt {
    let mut text = String::from("🏠 Product catalog:\n\n");
    for product in products {
        text.push_str(&format!(
            "{}\n💰 {}/m²\n{}\n\n",
            product.name,
            format_price(product.unit_price),
            truncate_chars(&product.description, CATALOG_DESCRIPTION_CHARS),
        ));
    }

    let mut prompt = Prompt::text(text);
    for product in products {
        prompt = prompt.option(format!("🛒 {}", product.name), Choice::Product(product.id));
    }
    prompt.option("🔙 Back", Choice::MainMenu)
}

/// Shown when the backend has no products to offer.
pub fn empty_catalog() -> Prompt {
    Prompt::text("The catalog is empty for now.").option("🔙 Back", Choice::MainMenu)
}

/// A single product's detail view with order and back actions.
pub fn product_card(product: &Product) -> Prompt {
    let mut text = format!(
        "🏠 {}\n\n📝 {}\n\n💰 Price: {}/m²\n📂 Category: {}\n",
        product.name,
        product.description,
        format_price(product.unit_price),
        product.category,
    );
    if let Some(specs) = &product.specifications {
        text.push_str(&format!("🔧 Specifications: {specs}\n"));
    }

    let mut prompt = Prompt::text(text)
        .option("🛒 Order", Choice::Order(product.id))
        .option("🔙 Back to catalog", Choice::Catalog);
    if let Some(url) = &product.image_url {
        prompt = prompt.with_image(url.clone());
    }
    prompt
}

pub fn ask_name() -> Prompt {
    Prompt::text("📝 To place your order, please tell us your name:").cancel_option("✖️ Cancel")
}

pub fn ask_phone() -> Prompt {
    Prompt::text("📞 Now your phone number:").cancel_option("✖️ Cancel")
}

pub fn ask_email() -> Prompt {
    Prompt::text("📧 Your email address:").cancel_option("✖️ Cancel")
}

pub fn invalid_email() -> Prompt {
    Prompt::text("That does not look like an email address. 📧 Your email address:")
        .cancel_option("✖️ Cancel")
}

pub fn ask_comment(skip_token: &str) -> Prompt {
    Prompt::text(format!(
        "💬 Add a comment to your order (or send '{skip_token}'):"
    ))
    .cancel_option("✖️ Cancel")
}

/// Confirmation after a successful submission.
pub fn order_submitted(order_id: i64, total: &str) -> Prompt {
    Prompt::text(format!(
        "✅ Order #{order_id} has been placed!\n\n\
         Total: {total}\n\
         Our manager will contact you shortly.\n\
         Thank you! 🙏"
    ))
    .option("🔙 Main menu", Choice::MainMenu)
}

/// Shown when submission fails; the conversation is over either way.
pub fn order_failed() -> Prompt {
    Prompt::text("❌ Your order could not be submitted. Please try again later.")
        .option("🔙 Main menu", Choice::MainMenu)
}

pub fn catalog_unavailable() -> Prompt {
    Prompt::text("Could not load the catalog. Please try again later.")
        .option("🔙 Back", Choice::MainMenu)
}

pub fn product_unavailable() -> Prompt {
    Prompt::text("Could not load that item. Please try again later.")
        .option("🔙 Back to catalog", Choice::Catalog)
        .option("🔙 Main menu", Choice::MainMenu)
}

/// Catalog page with a leading note that the previously chosen item vanished.
pub fn product_gone(catalog: Prompt) -> Prompt {
    Prompt {
        text: format!("That item is no longer available.\n\n{}", catalog.text),
        ..catalog
    }
}

/// Truncates on a character boundary, appending an ellipsis when shortened.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::types::{ProductId, PromptAction};
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: ProductId(id),
            name: name.into(),
            description: "Universal profile for roofing and walls.".into(),
            unit_price: Decimal::new(4500, 1),
            category: "Roofing".into(),
            image_url: None,
            specifications: None,
        }
    }

    fn selectable(prompt: &Prompt) -> Vec<PromptAction> {
        prompt.options.iter().map(|o| o.action).collect()
    }

    #[test]
    fn main_menu_offers_exactly_the_idle_choices() {
        let prompt = main_menu(&IntakeConfig::default());
        assert_eq!(
            selectable(&prompt),
            vec![
                PromptAction::Select(Choice::Catalog),
                PromptAction::Select(Choice::Contact),
                PromptAction::Select(Choice::About),
            ]
        );
    }

    #[test]
    fn catalog_page_offers_each_product_and_back() {
        let products = vec![product(1, "Corrugated sheet C8"), product(2, "Metal tile")];
        let prompt = catalog_page(&products);

        assert_eq!(
            selectable(&prompt),
            vec![
                PromptAction::Select(Choice::Product(ProductId(1))),
                PromptAction::Select(Choice::Product(ProductId(2))),
                PromptAction::Select(Choice::MainMenu),
            ]
        );
        assert!(prompt.text.contains("Corrugated sheet C8"));
        assert!(prompt.text.contains("450.0/m²"));
    }

    #[test]
    fn catalog_page_truncates_long_descriptions() {
        let mut item = product(1, "Siding");
        item.description = "x".repeat(150);
        let prompt = catalog_page(&[item]);
        assert!(prompt.text.contains(&format!("{}…", "x".repeat(100))));
        assert!(!prompt.text.contains(&"x".repeat(101)));
    }

    #[test]
    fn product_card_offers_order_and_back_to_catalog() {
        let mut item = product(3, "Vinyl siding");
        item.specifications = Some("Material: PVC".into());
        item.image_url = Some("https://example.com/siding.jpg".into());
        let prompt = product_card(&item);

        assert_eq!(
            selectable(&prompt),
            vec![
                PromptAction::Select(Choice::Order(ProductId(3))),
                PromptAction::Select(Choice::Catalog),
            ]
        );
        assert!(prompt.text.contains("Specifications: Material: PVC"));
        assert_eq!(prompt.image_url.as_deref(), Some("https://example.com/siding.jpg"));
    }

    #[test]
    fn collection_prompts_offer_only_cancel() {
        for prompt in [ask_name(), ask_phone(), ask_email(), ask_comment("skip")] {
            assert_eq!(selectable(&prompt), vec![PromptAction::Cancel]);
        }
        assert!(ask_comment("skip").text.contains("'skip'"));
    }

    #[test]
    fn product_gone_keeps_catalog_options() {
        let catalog = catalog_page(&[product(1, "Metal tile")]);
        let prompt = product_gone(catalog.clone());
        assert!(prompt.text.starts_with("That item is no longer available."));
        assert_eq!(prompt.options, catalog.options);
    }
}
