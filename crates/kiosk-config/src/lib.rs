// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Kiosk storefront bot.
//!
//! TOML files merged across the XDG hierarchy, `KIOSK_` environment
//! overrides, strict models (`deny_unknown_fields`), semantic validation,
//! and miette-rendered diagnostics with typo suggestions for unknown keys.
//!
//! The bot binary calls [`load_and_validate`] once at startup and renders
//! whatever errors come back:
//!
//! ```no_run
//! let config = match kiosk_config::load_and_validate() {
//!     Ok(config) => config,
//!     Err(errors) => {
//!         kiosk_config::render_errors(&errors);
//!         std::process::exit(1);
//!     }
//! };
//! println!("serving as {}", config.bot.name);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::KioskConfig;

/// Loads configuration from the XDG hierarchy, then validates it.
///
/// Figment failures (unknown keys, type mismatches) and semantic
/// validation failures both come back as [`ConfigError`] lists ready for
/// [`render_errors`]; a figment failure additionally carries a source span
/// into the TOML file it came from.
pub fn load_and_validate() -> Result<KioskConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &read_merged_files(),
        )),
    }
}

/// Loads configuration from a TOML string, then validates it.
///
/// The test-facing twin of [`load_and_validate`]; no files or environment
/// variables are consulted.
pub fn load_and_validate_str(toml_content: &str) -> Result<KioskConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Re-reads the config files the loader merges, pairing each existing one
/// with its content so diagnostics can point into it.
fn read_merged_files() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from("/etc/kiosk/kiosk.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("kiosk/kiosk.toml"));
    }
    // The local file is merged last; figment reports its path absolute.
    match std::env::current_dir() {
        Ok(cwd) => candidates.push(cwd.join("kiosk.toml")),
        Err(_) => candidates.push(std::path::PathBuf::from("kiosk.toml")),
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_inline_config_passes() {
        let config = load_and_validate_str(
            r#"
[bot]
name = "shopfront"

[commerce]
base_url = "https://shop.example.com"
"#,
        )
        .unwrap();
        assert_eq!(config.bot.name, "shopfront");
        assert_eq!(config.commerce.base_url, "https://shop.example.com");
    }

    #[test]
    fn unknown_key_yields_suggestion() {
        let errors = load_and_validate_str(
            r#"
[telegram]
bot_tken = "123:abc"
"#,
        )
        .unwrap_err();

        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "bot_tken" && suggestion.as_deref() == Some("bot_token")
        )));
    }

    #[test]
    fn semantic_validation_runs_after_parse() {
        let errors = load_and_validate_str(
            r#"
[commerce]
catalog_page_size = 0
"#,
        )
        .unwrap_err();

        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Validation { message } if message.contains("catalog_page_size")
        )));
    }
}
