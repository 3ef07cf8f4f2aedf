//! Formatter adapters.

mod whitespace;

pub use whitespace::{FORMATTED_EXTENSIONS, WhitespaceFormatter, format_text};
