use camino::{Utf8Path, Utf8PathBuf};

/// Workspace and package discovery, supplied by the caller.
///
/// Implementations must be deterministic and return absolute directory paths.
pub trait Discovery: Send + Sync {
    /// The workspace root containing `cwd`, if there is one.
    fn find_workspace_dir(&self, cwd: &Utf8Path) -> anyhow::Result<Option<Utf8PathBuf>>;

    /// Every package directory of the workspace, excluding the root itself.
    fn package_dirs(&self, workspace_dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>>;

    /// The name used for display and glob matching of the scope at `dir`.
    fn package_name(&self, dir: &Utf8Path) -> anyhow::Result<String>;
}
