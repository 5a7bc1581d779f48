//! Scope and workspace contexts.
//!
//! A [`Workspace`] lives for the whole run and aggregates failures. Each checked scope
//! (the workspace root or one package) gets its own [`ScopeContext`], which is sealed
//! into the workspace by [`ScopeContext::finish`].

use crate::discovery::Discovery;
use crate::rule::ResolvedConfig;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    WorkspaceRoot,
    Package,
}

/// One rule violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    /// File the violation is about.
    pub file: Utf8PathBuf,
    pub message: String,
    /// Extra detail, e.g. an expected/actual excerpt.
    pub long_message: Option<String>,
}

impl Failure {
    pub fn new(file: impl Into<Utf8PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
            long_message: None,
        }
    }

    pub fn with_long_message(mut self, long_message: impl Into<String>) -> Self {
        self.long_message = Some(long_message.into());
        self
    }
}

/// The sealed result of one checked scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeReport {
    pub name: String,
    pub dir: Utf8PathBuf,
    pub kind: ScopeKind,
    pub failures: Vec<Failure>,
}

impl ScopeReport {
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct Workspace<'a> {
    config: &'a ResolvedConfig,
    dir: Utf8PathBuf,
    name: String,
    failed: AtomicBool,
    reports: Mutex<Vec<ScopeReport>>,
}

impl<'a> Workspace<'a> {
    pub fn new(config: &'a ResolvedConfig, dir: Utf8PathBuf, name: String) -> Self {
        Self {
            config,
            dir,
            name,
            failed: AtomicBool::new(false),
            reports: Mutex::new(Vec::new()),
        }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &'a ResolvedConfig {
        self.config
    }

    /// Whether any sealed scope failed. Never goes back to `false` during a run.
    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    /// Package directories below the workspace root.
    pub fn package_dirs(&self, discovery: &dyn Discovery) -> anyhow::Result<Vec<Utf8PathBuf>> {
        discovery.package_dirs(&self.dir)
    }

    /// The scope for the workspace root itself.
    pub fn root_scope(&self) -> ScopeContext<'_> {
        ScopeContext::new(self, ScopeKind::WorkspaceRoot, self.name.clone(), self.dir.clone())
    }

    /// A scope for one package directory.
    pub fn package_scope(&self, dir: Utf8PathBuf, name: String) -> ScopeContext<'_> {
        ScopeContext::new(self, ScopeKind::Package, name, dir)
    }

    /// Sealed scope reports, in the order the scopes finished.
    pub fn into_reports(self) -> Vec<ScopeReport> {
        self.reports
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn seal(&self, report: ScopeReport) {
        if report.failed() {
            self.failed.store(true, Ordering::SeqCst);
        }
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report);
    }
}

/// The context a rule checks against.
#[derive(Debug)]
pub struct ScopeContext<'a> {
    workspace: &'a Workspace<'a>,
    kind: ScopeKind,
    name: String,
    dir: Utf8PathBuf,
    failures: Vec<Failure>,
}

impl<'a> ScopeContext<'a> {
    fn new(workspace: &'a Workspace<'a>, kind: ScopeKind, name: String, dir: Utf8PathBuf) -> Self {
        Self {
            workspace,
            kind,
            name,
            dir,
            failures: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn is_workspace_root(&self) -> bool {
        self.kind == ScopeKind::WorkspaceRoot
    }

    pub fn workspace(&self) -> &'a Workspace<'a> {
        self.workspace
    }

    pub fn config(&self) -> &'a ResolvedConfig {
        self.workspace.config()
    }

    /// Whether a rule has already failed this scope.
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Record a violation and mark the scope failed.
    pub fn add_error(&mut self, failure: Failure) {
        debug!(scope = %self.name, file = %failure.file, message = %failure.message, "rule failure");
        self.failures.push(failure);
    }

    /// Seal this scope's result into the workspace.
    pub fn finish(self) {
        let workspace = self.workspace;
        workspace.seal(ScopeReport {
            name: self.name,
            dir: self.dir,
            kind: self.kind,
            failures: self.failures,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_failure_is_sticky_across_scopes() {
        let config = ResolvedConfig::default();
        let workspace = Workspace::new(&config, Utf8PathBuf::from("/ws"), "root".to_string());

        let mut failing = workspace.package_scope(Utf8PathBuf::from("/ws/a"), "a".to_string());
        failing.add_error(Failure::new("/ws/a/package.json", "missing license"));
        assert!(failing.failed());
        failing.finish();
        assert!(workspace.failed());

        let passing = workspace.package_scope(Utf8PathBuf::from("/ws/b"), "b".to_string());
        passing.finish();
        assert!(workspace.failed());

        let reports = workspace.into_reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].name, "a");
        assert!(reports[0].failed());
        assert!(!reports[1].failed());
    }

    #[test]
    fn root_scope_uses_workspace_name_and_dir() {
        let config = ResolvedConfig::default();
        let workspace = Workspace::new(&config, Utf8PathBuf::from("/ws"), "monorepo".to_string());
        let scope = workspace.root_scope();
        assert!(scope.is_workspace_root());
        assert_eq!(scope.name(), "monorepo");
        assert_eq!(scope.dir().as_str(), "/ws");
        scope.finish();
        assert!(!workspace.failed());
    }

    #[test]
    fn failure_builder_sets_long_message() {
        let failure = Failure::new("package.json", "bad").with_long_message("expected x");
        assert_eq!(failure.long_message.as_deref(), Some("expected x"));
    }
}
