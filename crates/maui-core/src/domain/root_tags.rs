//! Class attributes on the application's `<html>` and `<body>` tags.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::value_objects::{ColorMode, ThemeColor};

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<html\b[^>]*>").expect("Invalid regex pattern for <html>"));
static BODY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body\b[^>]*>").expect("Invalid regex pattern for <body>"));
static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("Invalid regex pattern for class attribute")
});

const HTML_CLASSES: [&str; 2] = ["h-full", "scroll-smooth"];
const BODY_CLASSES: [&str; 2] = ["bg-background", "text-foreground"];
const DARK_CLASS: &str = "dark";

/// Add the layout, theme and colour-mode classes to `<html>` and `<body>`.
///
/// Existing classes keep their order and nothing is duplicated. Other theme
/// classes are removed from `<html>`, and `dark` is removed from `<body>` in
/// light mode. The rest of the document is untouched; a document without the
/// tags is returned as is.
pub fn update_root_tags(html: &str, color_mode: ColorMode, theme: ThemeColor) -> String {
    let stale_themes: Vec<&str> = ThemeColor::ALL
        .iter()
        .filter(|t| **t != theme)
        .map(ThemeColor::as_str)
        .collect();

    let mut html_add: Vec<&str> = HTML_CLASSES.to_vec();
    html_add.push(theme.as_str());
    let out = rewrite_tag(html, &HTML_TAG, &html_add, &stale_themes);

    let mut body_add: Vec<&str> = BODY_CLASSES.to_vec();
    let body_remove: Vec<&str> = if color_mode.is_dark() {
        body_add.push(DARK_CLASS);
        Vec::new()
    } else {
        vec![DARK_CLASS]
    };
    rewrite_tag(&out, &BODY_TAG, &body_add, &body_remove)
}

fn rewrite_tag(doc: &str, tag_re: &Regex, add: &[&str], remove: &[&str]) -> String {
    let Some(tag) = tag_re.find(doc) else {
        return doc.to_string();
    };
    let tag_text = tag.as_str();

    let new_tag = match CLASS_ATTR.captures(tag_text) {
        Some(caps) => {
            let (value, quote) = match (caps.get(1), caps.get(2)) {
                (Some(v), _) => (v.as_str(), '"'),
                (None, Some(v)) => (v.as_str(), '\''),
                (None, None) => ("", '"'),
            };
            let classes = merge_classes(value, add, remove);
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            format!(
                "{} class={quote}{classes}{quote}{}",
                &tag_text[..whole.start],
                &tag_text[whole.end..]
            )
        }
        None => {
            let classes = merge_classes("", add, remove);
            let insert_at = tag_text
                .strip_suffix("/>")
                .map_or(tag_text.len() - 1, |s| s.trim_end().len());
            format!(
                "{} class=\"{classes}\"{}",
                &tag_text[..insert_at],
                &tag_text[insert_at..]
            )
        }
    };

    let mut out = String::with_capacity(doc.len() + 64);
    out.push_str(&doc[..tag.start()]);
    out.push_str(&new_tag);
    out.push_str(&doc[tag.end()..]);
    out
}

fn merge_classes(current: &str, add: &[&str], remove: &[&str]) -> String {
    let mut classes: Vec<&str> = Vec::new();
    for class in current.split_whitespace().chain(add.iter().copied()) {
        if !remove.contains(&class) && !classes.contains(&class) {
            classes.push(class);
        }
    }
    classes.join(" ")
}
