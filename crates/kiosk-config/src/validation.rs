// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL shape, positive page sizes, and non-empty tokens.

use crate::diagnostic::ConfigError;
use crate::model::KioskConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &KioskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.bot.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "bot.name must not be empty".to_string(),
        });
    }

    let base_url = config.commerce.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "commerce.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!(
                "commerce.base_url `{base_url}` must start with http:// or https://"
            ),
        });
    }

    if config.commerce.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "commerce.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.commerce.catalog_page_size == 0 {
        errors.push(ConfigError::Validation {
            message: "commerce.catalog_page_size must be at least 1".to_string(),
        });
    }

    if config.intake.skip_token.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "intake.skip_token must not be empty".to_string(),
        });
    }

    // An empty token string is almost always a mis-set env var; catch it
    // here rather than at the first Telegram API call.
    if let Some(token) = &config.telegram.bot_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token is set but empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
