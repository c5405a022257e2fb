// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Kiosk storefront bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Kiosk configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KioskConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram transport settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Commerce backend API settings.
    #[serde(default)]
    pub commerce: CommerceConfig,

    /// Order-intake conversation settings.
    #[serde(default)]
    pub intake: IntakeConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "kiosk".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram transport configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required for `kiosk serve`.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Commerce backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommerceConfig {
    /// Base URL of the commerce API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many products one catalog page shows.
    #[serde(default = "default_catalog_page_size")]
    pub catalog_page_size: u32,
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            catalog_page_size: default_catalog_page_size(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_catalog_page_size() -> u32 {
    10
}

/// Order-intake conversation configuration.
///
/// Company card fields feed the contact/about menu entries verbatim.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Seconds of inactivity before an in-progress conversation is
    /// abandoned and its session cleared. `0` disables expiry.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Reply that skips the optional order comment (matched case-insensitively).
    #[serde(default = "default_skip_token")]
    pub skip_token: String,

    /// Company display name.
    #[serde(default = "default_company_name")]
    pub company_name: String,

    /// Contact phone number shown on the contact card.
    #[serde(default = "default_contact_phone")]
    pub contact_phone: String,

    /// Contact email shown on the contact card.
    #[serde(default = "default_contact_email")]
    pub contact_email: String,

    /// Website shown on the contact card.
    #[serde(default = "default_website")]
    pub website: String,

    /// Street address shown on the contact card.
    #[serde(default = "default_address")]
    pub address: String,

    /// Working hours shown on the contact card.
    #[serde(default = "default_working_hours")]
    pub working_hours: String,

    /// Free-form company description shown on the about card.
    #[serde(default = "default_about")]
    pub about: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            skip_token: default_skip_token(),
            company_name: default_company_name(),
            contact_phone: default_contact_phone(),
            contact_email: default_contact_email(),
            website: default_website(),
            address: default_address(),
            working_hours: default_working_hours(),
            about: default_about(),
        }
    }
}

fn default_idle_timeout_secs() -> u64 {
    900 // 15 minutes
}

fn default_skip_token() -> String {
    "skip".to_string()
}

fn default_company_name() -> String {
    "Kiosk Building Materials".to_string()
}

fn default_contact_phone() -> String {
    "+1 (555) 000-0000".to_string()
}

fn default_contact_email() -> String {
    "sales@example.com".to_string()
}

fn default_website() -> String {
    "www.example.com".to_string()
}

fn default_address() -> String {
    "1 Warehouse Lane".to_string()
}

fn default_working_hours() -> String {
    "Mon-Fri 9:00-18:00".to_string()
}

fn default_about() -> String {
    "We supply quality roofing and facade materials.".to_string()
}
