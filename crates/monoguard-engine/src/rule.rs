use crate::context::ScopeContext;
use crate::glob::PackageSelector;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Identity passed to a rule's check alongside its options.
#[derive(Clone, Copy, Debug)]
pub struct RuleMeta<'a> {
    pub id: &'a str,
}

/// A kind of rule (e.g. `package-entry`).
///
/// One instance of a rule type is shared by every configured rule of that kind, so any
/// state it keeps (such as counters reported by [`RuleType::stats_report`]) spans the run.
#[async_trait]
pub trait RuleType: Send + Sync {
    /// Stable kind name, used in config files and to de-duplicate stats hooks.
    fn kind(&self) -> &'static str;

    /// One-line description for listings.
    fn description(&self) -> &'static str;

    /// Validate rule options. Called once per run, before any scope is checked.
    fn validate_options(&self, options: &Value) -> anyhow::Result<()>;

    /// Check one scope.
    ///
    /// Violations are recorded with [`ScopeContext::add_error`]. Returning `Err` means
    /// the rule itself is broken and aborts the run.
    async fn check(
        &self,
        scope: &mut ScopeContext<'_>,
        options: &Value,
        meta: RuleMeta<'_>,
    ) -> anyhow::Result<()>;

    /// Diagnostics accumulated over the run, printed once per rule type.
    fn stats_report(&self) -> Option<String> {
        None
    }
}

/// A configured rule with every default filled in.
#[derive(Clone)]
pub struct ResolvedRule {
    pub id: String,
    /// Display name; `"unknown"` when the config leaves it out.
    pub name: String,
    pub options: Value,
    pub include_packages: PackageSelector,
    pub exclude_packages: PackageSelector,
    pub include_workspace_root: bool,
    pub rule_type: Arc<dyn RuleType>,
}

impl fmt::Debug for ResolvedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.rule_type.kind())
            .field("options", &self.options)
            .field("include_packages", &self.include_packages)
            .field("exclude_packages", &self.exclude_packages)
            .field("include_workspace_root", &self.include_workspace_root)
            .finish()
    }
}

/// Rules in execution order.
#[derive(Clone, Debug, Default)]
pub struct ResolvedConfig {
    pub rules: Vec<ResolvedRule>,
    pub verbose: bool,
}
