use crate::context::ScopeReport;
use camino::Utf8PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a run.
///
/// Ordinary rule failures are not errors: they are recorded on the scope and the
/// run continues.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no workspace root found from {cwd}")]
    WorkspaceNotFound { cwd: Utf8PathBuf },

    #[error("workspace discovery failed")]
    Discovery(#[source] BoxError),

    #[error("invalid options for rule `{rule}` ({id})")]
    InvalidOptions {
        rule: String,
        id: String,
        #[source]
        source: BoxError,
    },

    #[error("rule `{rule}` ({id}) raised an error while checking `{scope}`")]
    RuleCheck {
        rule: String,
        id: String,
        scope: String,
        #[source]
        source: BoxError,
        /// Scopes sealed before the error, in check order.
        reports: Vec<ScopeReport>,
    },
}

impl RunError {
    pub(crate) fn discovery(err: anyhow::Error) -> Self {
        RunError::Discovery(err.into())
    }

    /// Reports of the scopes that finished before the run aborted.
    pub fn partial_reports(&self) -> &[ScopeReport] {
        match self {
            RunError::RuleCheck { reports, .. } => reports,
            _ => &[],
        }
    }
}
