//! Repository adapters: find the workspace root and enumerate its packages.
//!
//! This crate is allowed to do filesystem IO. It only reads `package.json` files and
//! never writes.

#![forbid(unsafe_code)]

mod discover;
mod manifest;

use camino::{Utf8Path, Utf8PathBuf};
use monoguard_engine::Discovery;

pub use discover::{discover_packages, find_workspace_dir};
pub use manifest::{PACKAGE_JSON, package_name, read_package_json, workspace_patterns};

/// [`Discovery`] backed by the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsDiscovery;

impl Discovery for FsDiscovery {
    fn find_workspace_dir(&self, cwd: &Utf8Path) -> anyhow::Result<Option<Utf8PathBuf>> {
        find_workspace_dir(cwd)
    }

    fn package_dirs(&self, workspace_dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
        discover_packages(workspace_dir)
    }

    fn package_name(&self, dir: &Utf8Path) -> anyhow::Result<String> {
        package_name(dir)
    }
}
