//! BDD harness (cucumber-rs).
//!
//! This crate exists to keep scenario tests isolated from the production crates.

use camino::Utf8PathBuf;

/// The versioned swagger catalog shared by the workspace tests.
pub fn fixture_apis_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|root| root.join("tests").join("fixtures").join("apis").join("k8s"))
        .unwrap_or_default()
}
