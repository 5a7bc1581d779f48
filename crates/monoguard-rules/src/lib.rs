//! Built-in rule types.
//!
//! Each rule type reads what it needs from the scope's directory and records violations
//! on the scope. IO errors that make a rule unable to decide (an unreadable template, for
//! instance) are returned as errors and abort the run.

#![forbid(unsafe_code)]

mod banned_dependencies;
mod file_contents;
mod options;
mod package_entry;

#[cfg(test)]
mod test_util;

use monoguard_engine::RuleCatalog;
use std::sync::Arc;

pub use banned_dependencies::BannedDependencies;
pub use file_contents::FileContents;
pub use package_entry::PackageEntry;

/// Catalog with every built-in rule type registered.
pub fn builtin_catalog() -> RuleCatalog {
    RuleCatalog::new()
        .with(Arc::new(PackageEntry))
        .with(Arc::new(FileContents))
        .with(Arc::new(BannedDependencies::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_lists_kinds_in_order() {
        let catalog = builtin_catalog();
        let kinds: Vec<&str> = catalog.kinds().collect();
        assert_eq!(
            kinds,
            vec!["banned-dependencies", "file-contents", "package-entry"]
        );
        assert!(catalog.iter().all(|t| !t.description().is_empty()));
    }
}
