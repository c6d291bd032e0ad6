// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config error reporting for `kisanmitra.toml`.
//!
//! Loader failures come back from figment as a flat error list. Each one is
//! mapped to a [`ConfigError`] that miette can render, pointing at the
//! offending line when the TOML text is available.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a valid key needs before it is offered as a fix.
const CLOSE_ENOUGH: f64 = 0.75;

/// TOML text that fed the loader, kept around to label error spans.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub name: String,
    pub content: String,
}

impl ConfigSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no config section declares.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(kisanmitra::config::unknown_key),
        help("{}", key_hint(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a KisanMitra setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A known key holding a value of the wrong shape.
    #[error("`{key}` should be {expected}, found {found}")]
    #[diagnostic(code(kisanmitra::config::wrong_type))]
    WrongType {
        key: String,
        found: String,
        expected: String,
    },

    #[error("validation error: {message}")]
    #[diagnostic(code(kisanmitra::config::validation))]
    Validation { message: String },

    #[error("could not load configuration: {0}")]
    #[diagnostic(code(kisanmitra::config::load))]
    Load(String),
}

fn key_hint(suggestion: Option<&str>, valid_keys: &str) -> String {
    let known = format!("known keys here: {valid_keys}");
    match suggestion {
        Some(key) => format!("did you mean `{key}`? {known}"),
        None => known,
    }
}

/// Map every error figment reported onto a renderable [`ConfigError`].
pub fn collect_errors(err: figment::Error, sources: &[ConfigSource]) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| {
            let section = error.path.first().map(String::as_str);
            match &error.kind {
                Kind::UnknownField(key, expected) => {
                    let (span, src) = match source_for(&error, sources) {
                        Some(source) => match locate_key(&source.content, section, key) {
                            Some(span) => (
                                Some(span),
                                Some(NamedSource::new(&source.name, source.content.clone())),
                            ),
                            None => (None, None),
                        },
                        None => (None, None),
                    };
                    ConfigError::UnknownKey {
                        key: key.clone(),
                        suggestion: closest_key(key, expected).map(str::to_owned),
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                Kind::InvalidType(found, expected) => ConfigError::WrongType {
                    key: error.path.join("."),
                    found: found.to_string(),
                    expected: expected.clone(),
                },
                _ => ConfigError::Load(error.to_string()),
            }
        })
        .collect()
}

/// The TOML text an error came from. Inline strings carry no file path, so a
/// lone source is assumed to be the one.
fn source_for<'a>(
    error: &figment::error::Error,
    sources: &'a [ConfigSource],
) -> Option<&'a ConfigSource> {
    let file = error
        .metadata
        .as_ref()
        .and_then(|meta| meta.source.as_ref())
        .and_then(|source| source.file_path())
        .map(|path| path.display().to_string());

    match file {
        Some(name) => sources.iter().find(|s| s.name == name),
        None if sources.len() == 1 => sources.first(),
        None => None,
    }
}

/// Span of `key` inside the `[section]` table of `content`, or among the
/// top-level keys when `section` is `None`.
pub fn locate_key(content: &str, section: Option<&str>, key: &str) -> Option<SourceSpan> {
    let mut in_table = section.is_none();
    let mut line_start = 0;

    for line in content.split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let text = line.trim();

        if text.starts_with('[') {
            let table = text.trim_start_matches('[').trim_end_matches(']').trim();
            in_table = section == Some(table);
        } else if in_table {
            let is_key = text
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='));
            if is_key {
                return Some(SourceSpan::new((line_start + indent).into(), key.len()));
            }
        }

        line_start += line.len();
    }

    None
}

/// The valid key most similar to `unknown`, if any is close enough.
pub fn closest_key<'a>(unknown: &str, valid_keys: &[&'a str]) -> Option<&'a str> {
    let mut best: Option<(f64, &'a str)> = None;
    for &candidate in valid_keys {
        let score = strsim::jaro_winkler(unknown, candidate);
        if score > CLOSE_ENOUGH && best.is_none_or(|(top, _)| score > top) {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, key)| key)
}

/// Print each error to stderr as a miette report.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut out = String::new();
        match handler.render_report(&mut out, error) {
            Ok(()) => eprint!("{out}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
