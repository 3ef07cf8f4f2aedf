//! Package manifest adapters.

mod package_json;

pub use package_json::{MANIFEST_FILE, PackageJson};
