//! Global stylesheet merge.
//!
//! A stylesheet has two managed regions: required `@import`/`@tailwind`
//! directives, which must each appear once, and a single theme block delimited
//! by marker comments. Everything else is left exactly as found.

use crate::domain::error::DomainError;

pub const THEME_START: &str = "/* maui:theme ";
pub const THEME_END: &str = "/* maui:theme-end */";

/// One named theme's CSS, rendered between marker comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeBlock {
    pub name: String,
    pub css: String,
}

impl ThemeBlock {
    pub fn new(name: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            css: css.into(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "{THEME_START}{} */\n{}\n{THEME_END}",
            self.name,
            self.css.trim()
        )
    }
}

/// Directive lines of an imports template, blank lines dropped.
pub fn parse_imports(template: &str) -> Vec<String> {
    template
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Merge required imports and a theme block into a stylesheet.
///
/// - absent (or blank) `existing`: imports, a blank line, then the theme.
/// - otherwise: imports not already contained anywhere are inserted at the
///   top; an existing theme block is replaced in place, or the theme is
///   appended after a blank line. Extra theme blocks are removed.
///
/// Applying the same merge twice gives the same text as applying it once.
///
/// # Errors
///
/// `MalformedStylesheet` when a theme start marker has no end marker.
pub fn merge_styles(
    existing: Option<&str>,
    required_imports: &[String],
    theme: &ThemeBlock,
) -> Result<String, DomainError> {
    let rendered = theme.render();

    let existing = match existing {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            return Ok(format!("{}\n\n{rendered}\n", required_imports.join("\n")));
        }
    };

    let mut body = replace_theme_blocks(existing, &rendered)?;

    // imports that only lived inside the replaced block must come back
    let outside_theme = body.replacen(&rendered, "", 1);
    let missing: Vec<&str> = required_imports
        .iter()
        .map(String::as_str)
        .filter(|import| !outside_theme.contains(*import))
        .collect();
    if !missing.is_empty() {
        let starts_with_directive = body.trim_start().starts_with('@');
        let separator = if starts_with_directive { "\n" } else { "\n\n" };
        body = format!("{}{separator}{body}", missing.join("\n"));
    }

    Ok(body)
}

/// Byte ranges of every marked theme block, end marker included.
fn theme_block_ranges(text: &str) -> Result<Vec<(usize, usize)>, DomainError> {
    let mut ranges = Vec::new();
    let mut from = 0;

    while let Some(found) = text[from..].find(THEME_START) {
        let start = from + found;
        let end = text[start..]
            .find(THEME_END)
            .map(|i| start + i + THEME_END.len())
            .ok_or_else(|| DomainError::MalformedStylesheet {
                reason: format!("theme block at offset {start} has no '{THEME_END}' marker"),
            })?;
        ranges.push((start, end));
        from = end;
    }

    Ok(ranges)
}

fn replace_theme_blocks(existing: &str, rendered: &str) -> Result<String, DomainError> {
    let ranges = theme_block_ranges(existing)?;

    let Some(&(first_start, first_end)) = ranges.first() else {
        let mut out = existing.to_string();
        if !out.ends_with('\n') {
            out.push('\n');
        }
        if !out.ends_with("\n\n") {
            out.push('\n');
        }
        out.push_str(rendered);
        out.push('\n');
        return Ok(out);
    };

    let mut out = String::with_capacity(existing.len() + rendered.len());
    out.push_str(&existing[..first_start]);
    out.push_str(rendered);
    let mut cursor = first_end;
    for &(start, end) in &ranges[1..] {
        out.push_str(&existing[cursor..start]);
        cursor = end;
        // drop the line break that followed the removed block
        if existing[cursor..].starts_with('\n') {
            cursor += 1;
        }
    }
    out.push_str(&existing[cursor..]);
    Ok(out)
}
