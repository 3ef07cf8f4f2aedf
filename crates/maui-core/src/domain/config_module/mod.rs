//! Configuration modules: extract, evaluate, merge and serialize.
//!
//! A configuration module is a file whose only meaningful content is one
//! `module.exports = { ... }` object literal. [`ConfigDocument`] holds the
//! verbatim header preceding the assignment and the evaluated body.
//!
//! ```text
//!   source ──extract──► (header, literal) ──evaluate──► ConfigMap
//!                                                          │
//!   incoming ConfigDocument ─────────────── merge ◄────────┘
//!                                             │
//!                                         serialize ──► source
//! ```

pub mod evaluate;
pub mod extract;
pub mod merge;
pub mod serialize;
pub mod value;

pub use evaluate::{evaluate, evaluate_object};
pub use extract::{Extracted, extract};
pub use merge::{CANONICAL_ORDER, MergePolicy, merge};
pub use serialize::serialize;
pub use value::{ConfigMap, ConfigValue, KnownCallables, PlaceholderCall};

use std::collections::HashSet;

use crate::domain::error::DomainError;
use extract::is_ident_byte;

/// A parsed configuration module.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    pub header: String,
    pub body: ConfigMap,
}

impl ConfigDocument {
    pub fn new(header: impl Into<String>, body: ConfigMap) -> Self {
        Self {
            header: header.into(),
            body,
        }
    }

    /// Extract and evaluate a module's source.
    pub fn parse(source: &str, known: &KnownCallables) -> Result<Self, DomainError> {
        let extracted = extract(source)?;
        let body = evaluate_object(extracted.literal, known)?;
        Ok(Self::new(extracted.header, body))
    }

    /// Module text, newline-terminated.
    pub fn render(&self) -> String {
        let mut text = serialize(&self.header, &self.body);
        text.push('\n');
        text
    }

    /// Merge `incoming` over `self`.
    ///
    /// The body follows the [`MergePolicy`] table. The header keeps this
    /// document's text and gains any incoming line it does not already have.
    pub fn merged_with(&self, incoming: &ConfigDocument) -> ConfigDocument {
        ConfigDocument {
            header: merge_headers(&self.header, &incoming.header),
            body: merge(&self.body, &incoming.body),
        }
    }
}

/// Merge `incoming` into an existing module source.
///
/// A missing or blank existing source yields `incoming` as is.
///
/// # Errors
///
/// `MalformedConfig` / `UnsupportedExpression` from parsing `existing`. The
/// caller decides whether to fall back to overwriting.
pub fn merge_config_source(
    existing: Option<&str>,
    incoming: &ConfigDocument,
    known: &KnownCallables,
) -> Result<String, DomainError> {
    match existing {
        Some(source) if !source.trim().is_empty() => {
            let current = ConfigDocument::parse(source, known)?;
            Ok(current.merged_with(incoming).render())
        }
        _ => Ok(incoming.render()),
    }
}

/// Append the incoming header lines the existing header lacks.
///
/// A declaration is skipped when any name it binds is already declared, since
/// redeclaring a `const` is a syntax error. Other lines compare as text with
/// quote style ignored.
fn merge_headers(existing: &str, incoming: &str) -> String {
    let declared: HashSet<&str> = existing
        .lines()
        .flat_map(|line| declared_names(line.trim()))
        .collect();
    let have: HashSet<String> = existing.lines().map(normalized_line).collect();

    let missing: Vec<&str> = incoming
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            let names = declared_names(trimmed);
            if names.is_empty() {
                !have.contains(&normalized_line(trimmed))
            } else {
                !names.iter().any(|name| declared.contains(name))
            }
        })
        .collect();

    if missing.is_empty() {
        return existing.to_string();
    }

    let content = existing.trim_end();
    if content.is_empty() {
        return incoming.to_string();
    }
    let trailing = match &existing[content.len()..] {
        ws if ws.contains("\n\n") => ws,
        _ => "\n\n",
    };
    format!("{content}\n{}{trailing}", missing.join("\n"))
}

/// Names bound by a one-line `const`/`let`/`var` declaration, including the
/// targets of an object destructuring (`const { join, resolve: r } = ...`).
fn declared_names(line: &str) -> Vec<&str> {
    let Some(rest) = ["const ", "let ", "var "]
        .iter()
        .find_map(|keyword| line.strip_prefix(keyword))
    else {
        return Vec::new();
    };
    let Some((pattern, _)) = rest.split_once('=') else {
        return Vec::new();
    };

    let pattern = pattern.trim();
    let candidates: Vec<&str> = match pattern
        .strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
    {
        Some(inner) => inner
            .split(',')
            .filter_map(|part| part.rsplit(':').next())
            .map(str::trim)
            .collect(),
        None => vec![pattern],
    };

    candidates
        .into_iter()
        .filter(|name| !name.is_empty() && name.bytes().all(is_ident_byte))
        .collect()
}

fn normalized_line(line: &str) -> String {
    line.trim().trim_end_matches(';').replace('"', "'")
}
