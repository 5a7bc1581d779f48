//! Rule execution engine (no filesystem IO of its own).
//!
//! Input: a resolved rule list and a [`Discovery`] implementation.
//! Output: pass/fail per scope, the sealed failure reports and run statistics.
//!
//! Scopes are checked one after another and, within a scope, rules run strictly in
//! declared order. Nothing here spawns tasks.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod context;
pub mod discovery;
pub mod glob;
pub mod rule;
pub mod stats;

mod checker;
mod error;
mod run;
mod skip;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalog::RuleCatalog;
pub use checker::check_package;
pub use context::{Failure, ScopeContext, ScopeKind, ScopeReport, Workspace};
pub use discovery::Discovery;
pub use error::{BoxError, RunError};
pub use glob::{GlobList, PackageSelector};
pub use rule::{ResolvedConfig, ResolvedRule, RuleMeta, RuleType};
pub use run::{CheckRequest, RunOutcome, check};
pub use skip::should_skip;
pub use stats::{GlobCost, GlobTiming, RuleTiming, RuleTypeStats, RunStats};
