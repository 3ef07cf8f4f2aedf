//! Formatting pass over staged files.

use serde_json::Value;
use tracing::{debug, instrument};

use maui_core::application::ports::{ChangeKind, Formatter, Tree};
use maui_core::error::MauiResult;

/// Extensions the formatter rewrites.
pub const FORMATTED_EXTENSIONS: [&str; 6] = ["json", "js", "ts", "css", "scss", "html"];

/// Normalises whitespace in changed text files.
///
/// JSON files are re-printed with two-space indentation. Every file loses
/// trailing whitespace and ends with exactly one newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceFormatter;

impl WhitespaceFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for WhitespaceFormatter {
    #[instrument(skip_all)]
    fn format(&self, tree: &mut dyn Tree) -> MauiResult<usize> {
        let mut rewritten = 0;
        for change in tree.list_changes() {
            if change.kind == ChangeKind::Delete || !is_formatted(&change.path) {
                continue;
            }
            let Some(text) = tree.read(&change.path)?.and_then(|b| String::from_utf8(b).ok())
            else {
                continue;
            };

            let formatted = format_text(&change.path, &text);
            if formatted != text {
                debug!(path = %change.path, "Formatted");
                tree.write_string(&change.path, &formatted)?;
                rewritten += 1;
            }
        }
        Ok(rewritten)
    }
}

fn is_formatted(path: &str) -> bool {
    path.rsplit_once('.')
        .is_some_and(|(_, ext)| FORMATTED_EXTENSIONS.contains(&ext))
}

/// Format one file's text.
pub fn format_text(path: &str, text: &str) -> String {
    let pretty = if path.ends_with(".json") {
        serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|v| serde_json::to_string_pretty(&v).ok())
    } else {
        None
    };
    let source = pretty.as_deref().unwrap_or(text);

    let mut out = String::with_capacity(source.len() + 1);
    for line in source.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    let trimmed = out.trim_end_matches('\n').len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemoryTree;

    #[test]
    fn json_is_repretty_printed() {
        assert_eq!(
            format_text("project.json", "{\"name\":\"maui\",\"tags\":[]}"),
            "{\n  \"name\": \"maui\",\n  \"tags\": []\n}\n"
        );
    }

    #[test]
    fn invalid_json_only_gets_whitespace_fixes() {
        assert_eq!(format_text("bad.json", "{ nope   \n\n\n"), "{ nope\n");
    }

    #[test]
    fn trailing_whitespace_and_final_newline() {
        assert_eq!(format_text("a.css", "a {  \n}\t"), "a {\n}\n");
        assert_eq!(format_text("a.css", "a {}\n\n\n"), "a {}\n");
    }

    #[test]
    fn only_changed_text_files_are_touched() {
        let mut tree = MemoryTree::new().with_file("untouched.ts", "x  ");
        tree.write_string("maui/src/index.ts", "export {};  ").unwrap();
        tree.write_string("maui/README.md", "line  ").unwrap();

        let count = WhitespaceFormatter.format(&mut tree).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            tree.read_to_string("maui/src/index.ts").unwrap().as_deref(),
            Some("export {};\n")
        );
        assert_eq!(
            tree.read_to_string("maui/README.md").unwrap().as_deref(),
            Some("line  ")
        );
        assert_eq!(
            tree.read_to_string("untouched.ts").unwrap().as_deref(),
            Some("x  ")
        );
    }
}
