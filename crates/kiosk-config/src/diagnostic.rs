// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns configuration failures into readable miette reports.
//!
//! Figment reports deserialization problems as a flat error chain with key
//! paths; this module classifies each into a [`ConfigError`], attaches a
//! source span pointing at the offending line of the TOML file, and adds a
//! "did you mean?" suggestion when an unknown key is close to a real one.

#![allow(unused_assignments)] // triggered by miette's Diagnostic derive expansion

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a candidate key must beat before it is offered as a
/// correction. High enough that `skip_tokn` maps to `skip_token` but an
/// unrelated key maps to nothing.
const MIN_SIMILARITY: f64 = 0.75;

/// One reportable configuration problem.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key no section declares.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(kiosk::config::unknown_key),
        help("{}", advice_for(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest declared key, when one is similar enough.
        suggestion: Option<String>,
        /// Comma-separated keys the section does declare.
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value whose TOML type does not match the field.
    #[error("`{key}` has the wrong type: {detail}")]
    #[diagnostic(code(kiosk::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A key the model requires but no source provided.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(kiosk::config::missing_key),
        help("set `{key}` in kiosk.toml or the matching KIOSK_ variable")
    )]
    MissingKey { key: String },

    /// A well-typed value that fails a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(kiosk::config::validation))]
    Validation { message: String },

    /// Anything figment reports that has no richer mapping.
    #[error("configuration error: {0}")]
    #[diagnostic(code(kiosk::config::other))]
    Other(String),
}

fn advice_for(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(best) => format!("did you mean `{best}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Classifies every entry of a figment error chain into a [`ConfigError`].
///
/// `toml_sources` holds `(path, content)` pairs of the TOML files that were
/// merged, so unknown-key errors can carry a span into the file they came
/// from. Sources that were not files (env vars, inline strings) simply get
/// no span.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|entry| classify(entry, toml_sources))
        .collect()
}

fn classify(error: figment::error::Error, toml_sources: &[(String, String)]) -> ConfigError {
    use figment::error::Kind;

    match &error.kind {
        Kind::UnknownField(field, declared) => {
            let declared: Vec<&str> = declared.to_vec();
            let (span, src) = locate(&error, field, toml_sources).unzip();
            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion: suggest_key(field, &declared),
                valid_keys: declared.join(", "),
                span,
                src,
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: field.clone().into_owned(),
        },
        Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
            key: error.path.join("."),
            detail: format!("found {actual}, expected {expected}"),
            expected: expected.to_string(),
            span: None,
            src: None,
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

/// Resolves an error to a span inside the TOML file it originated from.
fn locate(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let file = error.metadata.as_ref()?.source.as_ref()?;
    let figment::Source::File(path) = file else {
        return None;
    };
    let path = path.display().to_string();

    let (_, content) = toml_sources.iter().find(|(p, _)| *p == path)?;
    let offset = find_key_offset(content, &error.path, field)?;

    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(path, content.clone()),
    ))
}

/// Byte offset of `field` within its section of a TOML document.
///
/// Walks the document line by line, tracking which `[section]` is open, and
/// matches `field` only as the left-hand side of an assignment inside the
/// section named by `path` (or before any section header for top-level
/// keys). Returns `None` when the key is not textually present, in which
/// case the diagnostic is rendered without a span.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let wanted_header = path.first().map(|section| format!("[{section}]"));
    let mut in_section = wanted_header.is_none();
    let mut offset = 0;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            in_section = match &wanted_header {
                Some(header) => trimmed.trim_end() == header,
                None => false,
            };
        } else if in_section
            && let Some((lhs, _)) = trimmed.split_once('=')
            && lhs.trim_end() == field
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len() + 1;
    }

    None
}

/// Best fuzzy match for an unknown key among the declared ones.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (strsim::jaro_winkler(unknown, key), key))
        .filter(|(score, _)| *score > MIN_SIMILARITY)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, key)| key.to_string())
}

/// Prints each error as a miette graphical report on stderr.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{rendered}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_bot_tken_for_bot_token() {
        let valid = &["bot_token"];
        assert_eq!(
            suggest_key("bot_tken", valid),
            Some("bot_token".to_string())
        );
    }

    #[test]
    fn suggest_picks_the_closest_of_several_keys() {
        let valid = &["base_url", "timeout_secs", "catalog_page_size"];
        assert_eq!(suggest_key("base_ulr", valid), Some("base_url".to_string()));
        assert_eq!(
            suggest_key("timeout_sec", valid),
            Some("timeout_secs".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["base_url", "timeout_secs", "catalog_page_size"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[telegram]\nbot_tken = \"abc\"\n";
        let path = vec!["telegram".to_string()];
        let offset = find_key_offset(content, &path, "bot_tken").unwrap();
        assert_eq!(&content[offset..offset + 8], "bot_tken");
    }

    #[test]
    fn find_key_offset_ignores_the_same_key_in_other_sections() {
        let content = "[bot]\nname = \"kiosk\"\n\n[intake]\nname = \"oops\"\n";
        let path = vec!["intake".to_string()];
        let offset = find_key_offset(content, &path, "name").unwrap();
        assert!(offset > content.find("[intake]").unwrap());
    }

    #[test]
    fn find_key_offset_top_level_stops_at_first_section() {
        let content = "title = \"x\"\n[bot]\ntitle = \"y\"\n";
        assert_eq!(find_key_offset(content, &[], "title"), Some(0));
        assert_eq!(find_key_offset(content, &[], "name"), None);
    }
}
