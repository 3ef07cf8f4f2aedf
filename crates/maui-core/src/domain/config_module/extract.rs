//! Locating the exported object literal inside a config module.
//!
//! The scan is lexical: strings, template literals and comments are skipped so
//! that a `module.exports` inside a comment or a brace inside a string never
//! confuses the search. Regex literals are not recognised; config headers in
//! practice only hold `require` statements and comments.

use crate::domain::error::DomainError;

const EXPORT_TOKEN: &str = "module.exports";

/// A config module split around its exported object literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extracted<'a> {
    /// Everything before the `module.exports` assignment, verbatim.
    pub header: &'a str,
    /// The object literal, from `{` to its matching `}` inclusive.
    pub literal: &'a str,
    /// Whatever follows the closing brace (usually `;` and a newline).
    pub trailer: &'a str,
}

/// Split `source` into header and object literal.
///
/// Finds the first top-level `module.exports = {` and matches its braces.
///
/// # Errors
///
/// `MalformedConfig` when there is no such assignment or its braces, strings
/// or comments never close.
pub fn extract(source: &str) -> Result<Extracted<'_>, DomainError> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0;

    while pos < bytes.len() {
        if let Some(next) = skip_comment(source, pos)? {
            pos = next;
            continue;
        }

        match bytes[pos] {
            b'\'' | b'"' | b'`' => {
                pos = skip_string(source, pos)?;
                continue;
            }
            b'{' | b'(' | b'[' => depth += 1,
            b'}' | b')' | b']' => depth = depth.saturating_sub(1),
            _ if depth == 0 && is_export_at(source, pos) => {
                if let Some(open) = assignment_brace(source, pos + EXPORT_TOKEN.len())? {
                    let close = match_brace(source, open)?;
                    return Ok(Extracted {
                        header: &source[..pos],
                        literal: &source[open..=close],
                        trailer: &source[close + 1..],
                    });
                }
            }
            _ => {}
        }
        pos += 1;
    }

    Err(DomainError::malformed(
        "no top-level `module.exports = { ... }` assignment found",
    ))
}

fn is_export_at(source: &str, pos: usize) -> bool {
    let bytes = source.as_bytes();
    bytes[pos..].starts_with(EXPORT_TOKEN.as_bytes())
        && (pos == 0 || !is_ident_byte(bytes[pos - 1]))
        && bytes
            .get(pos + EXPORT_TOKEN.len())
            .is_none_or(|b| !is_ident_byte(*b))
}

/// After `module.exports`, expect `=` (not `==`) and then `{`.
fn assignment_brace(source: &str, mut pos: usize) -> Result<Option<usize>, DomainError> {
    let bytes = source.as_bytes();
    pos = skip_trivia(source, pos)?;
    if bytes.get(pos) != Some(&b'=') || bytes.get(pos + 1) == Some(&b'=') {
        return Ok(None);
    }
    pos = skip_trivia(source, pos + 1)?;
    Ok((bytes.get(pos) == Some(&b'{')).then_some(pos))
}

// -----------------------------------------------------------------------------
// Lexical helpers shared with the evaluator
// -----------------------------------------------------------------------------

/// Identifier byte. Any non-ASCII byte counts, so a multi-byte character is
/// always consumed whole.
pub(super) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || !b.is_ascii()
}

/// Skip whitespace and comments.
pub(super) fn skip_trivia(source: &str, mut pos: usize) -> Result<usize, DomainError> {
    let bytes = source.as_bytes();
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        match skip_comment(source, pos)? {
            Some(next) => pos = next,
            None => return Ok(pos),
        }
    }
}

/// If a comment starts at `pos`, return the position just past it.
///
/// Works on bytes: `pos` may sit inside a multi-byte character.
pub(super) fn skip_comment(source: &str, pos: usize) -> Result<Option<usize>, DomainError> {
    let rest = source.as_bytes().get(pos..).unwrap_or_default();
    if rest.starts_with(b"//") {
        return Ok(Some(
            rest.iter().position(|&b| b == b'\n').map_or(source.len(), |i| pos + i),
        ));
    }
    if rest.starts_with(b"/*") {
        return match rest[2..].windows(2).position(|w| w == b"*/") {
            Some(i) => Ok(Some(pos + 2 + i + 2)),
            None => Err(DomainError::malformed(format!(
                "unterminated block comment at offset {pos}"
            ))),
        };
    }
    Ok(None)
}

/// Skip a quoted string or template literal starting at `start`, returning
/// the position after its closing quote.
pub(super) fn skip_string(source: &str, start: usize) -> Result<usize, DomainError> {
    let bytes = source.as_bytes();
    let quote = bytes[start];
    let mut i = start + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'$' if quote == b'`' && bytes.get(i + 1) == Some(&b'{') => {
                i = match_brace(source, i + 1)? + 1;
            }
            b'\n' if quote != b'`' => break,
            c if c == quote => return Ok(i + 1),
            _ => i += 1,
        }
    }

    Err(DomainError::malformed(format!(
        "unterminated string starting at offset {start}"
    )))
}

/// Index of the `}` matching the `{` at `open`.
pub(super) fn match_brace(source: &str, open: usize) -> Result<usize, DomainError> {
    match_delimiter(source, open, b'{', b'}')
}

/// Index of the closer matching the opener at `open`, skipping strings and
/// comments.
pub(super) fn match_delimiter(
    source: &str,
    open: usize,
    opener: u8,
    closer: u8,
) -> Result<usize, DomainError> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        if let Some(next) = skip_comment(source, i)? {
            i = next;
            continue;
        }
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                i = skip_string(source, i)?;
                continue;
            }
            c if c == opener => depth += 1,
            c if c == closer => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    Err(DomainError::malformed(format!(
        "unbalanced '{}' at offset {open}",
        opener as char
    )))
}
