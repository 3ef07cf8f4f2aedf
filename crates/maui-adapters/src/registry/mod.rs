//! Project registry adapters.

mod json;

pub use json::{JsonProjectRegistry, PROJECT_FILE, SKIPPED_DIRS};
