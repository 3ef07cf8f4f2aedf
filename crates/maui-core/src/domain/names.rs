//! Name variants used by templates and project descriptors.

use crate::domain::error::DomainError;

/// Every casing of a project name a template may ask for.
///
/// | Field | `my-lib` |
/// |-------|----------|
/// | `name` | `my-lib` |
/// | `class_name` | `MyLib` |
/// | `property_name` | `myLib` |
/// | `constant_name` | `MY_LIB` |
/// | `file_name` | `my-lib` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    pub name: String,
    pub class_name: String,
    pub property_name: String,
    pub constant_name: String,
    pub file_name: String,
}

impl Names {
    pub fn new(name: &str) -> Self {
        let words = split_words(name);
        let class_name: String = words.iter().map(|w| capitalize(w)).collect();
        let property_name = match words.split_first() {
            Some((first, rest)) => {
                let mut s = first.clone();
                s.extend(rest.iter().map(|w| capitalize(w)));
                s
            }
            None => String::new(),
        };

        Self {
            name: name.to_string(),
            class_name,
            property_name,
            constant_name: words.join("_").to_uppercase(),
            file_name: words.join("-"),
        }
    }

    /// Template variables, keyed as they appear in `{{VAR}}` / `__VAR__`.
    pub fn variables(&self) -> [(&'static str, &str); 5] {
        [
            ("NAME", self.name.as_str()),
            ("CLASS_NAME", self.class_name.as_str()),
            ("PROPERTY_NAME", self.property_name.as_str()),
            ("CONSTANT_NAME", self.constant_name.as_str()),
            ("FILE_NAME", self.file_name.as_str()),
        ]
    }
}

/// Validate a project name used as a directory and registry key.
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let first = name.chars().next().ok_or_else(|| invalid("name is empty"))?;
    if !first.is_ascii_alphabetic() {
        return Err(invalid("must start with a letter"));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(invalid(&format!("contains '{bad}'")));
    }
    Ok(())
}

/// Relative path from `root` back to the workspace root: `libs/ui` -> `../../`.
pub fn offset_from_root(root: &str) -> String {
    let depth = root
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .count();
    if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Lowercased words split on separators, camelCase and acronym boundaries.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c == '/' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            // myApp -> my + App
            if (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
            // HTTPServer -> HTTP + Server
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }
    words
}
