//! In-memory discovery and a recording rule type for tests.

use crate::context::{Failure, ScopeContext};
use crate::discovery::Discovery;
use crate::glob::PackageSelector;
use crate::rule::{ResolvedRule, RuleMeta, RuleType};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Discovery over a fixed set of directories.
#[derive(Clone, Debug)]
pub struct StaticDiscovery {
    root: Utf8PathBuf,
    root_name: String,
    packages: Vec<(Utf8PathBuf, String)>,
}

impl StaticDiscovery {
    pub fn new(root: &str, root_name: &str) -> Self {
        Self {
            root: Utf8PathBuf::from(root),
            root_name: root_name.to_string(),
            packages: Vec::new(),
        }
    }

    pub fn with_package(mut self, dir: &str, name: &str) -> Self {
        self.packages.push((Utf8PathBuf::from(dir), name.to_string()));
        self
    }
}

impl Discovery for StaticDiscovery {
    fn find_workspace_dir(&self, cwd: &Utf8Path) -> anyhow::Result<Option<Utf8PathBuf>> {
        Ok(cwd.starts_with(&self.root).then(|| self.root.clone()))
    }

    fn package_dirs(&self, _workspace_dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
        Ok(self.packages.iter().map(|(dir, _)| dir.clone()).collect())
    }

    fn package_name(&self, dir: &Utf8Path) -> anyhow::Result<String> {
        if dir == self.root.as_path() {
            return Ok(self.root_name.clone());
        }
        self.packages
            .iter()
            .find(|(candidate, _)| candidate.as_path() == dir)
            .map(|(_, name)| name.clone())
            .ok_or_else(|| anyhow::anyhow!("unknown package dir: {dir}"))
    }
}

/// Shared, ordered record of check invocations.
#[derive(Clone, Debug, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: String) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// A rule type driven entirely by its options.
///
/// Options:
/// - `"fail": [names]` records a failure for those scopes;
/// - `"error": [names]` returns an error for those scopes;
/// - `"invalid": true` makes option validation fail.
///
/// Each check logs `"{id}@{scope}"`, suffixed with `!failed` when the scope had already
/// failed before the check ran.
#[derive(Debug, Default)]
pub struct RecordingRule {
    kind: &'static str,
    log: CallLog,
    validations: AtomicUsize,
    stats_calls: AtomicUsize,
}

impl RecordingRule {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn logging_to(mut self, log: &CallLog) -> Self {
        self.log = log.clone();
        self
    }

    pub fn validations(&self) -> usize {
        self.validations.load(Ordering::SeqCst)
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }
}

fn listed(options: &Value, key: &str, name: &str) -> bool {
    options
        .get(key)
        .and_then(Value::as_array)
        .is_some_and(|names| names.iter().any(|n| n.as_str() == Some(name)))
}

#[async_trait]
impl RuleType for RecordingRule {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn description(&self) -> &'static str {
        "records every check for assertions"
    }

    fn validate_options(&self, options: &Value) -> anyhow::Result<()> {
        self.validations.fetch_add(1, Ordering::SeqCst);
        if options.get("invalid") == Some(&Value::Bool(true)) {
            anyhow::bail!("options marked invalid");
        }
        Ok(())
    }

    async fn check(
        &self,
        scope: &mut ScopeContext<'_>,
        options: &Value,
        meta: RuleMeta<'_>,
    ) -> anyhow::Result<()> {
        let suffix = if scope.failed() { "!failed" } else { "" };
        self.log
            .push(format!("{}@{}{}", meta.id, scope.name(), suffix));

        if listed(options, "error", scope.name()) {
            anyhow::bail!("{} blew up on {}", self.kind, scope.name());
        }
        if listed(options, "fail", scope.name()) {
            let file = scope.dir().join("package.json");
            scope.add_error(Failure::new(file, format!("{} failed", self.kind)));
        }
        Ok(())
    }

    fn stats_report(&self) -> Option<String> {
        let calls = self.stats_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Some(format!("{}: stats requested {calls} time(s)", self.kind))
    }
}

/// A rule named after its kind that applies to every package but not the root.
pub fn resolved_rule(kind: &'static str) -> ResolvedRule {
    resolved_rule_with(Arc::new(RecordingRule::new(kind)))
}

pub fn resolved_rule_with(rule_type: Arc<dyn RuleType>) -> ResolvedRule {
    let kind = rule_type.kind();
    ResolvedRule {
        id: format!("{kind}#0"),
        name: kind.to_string(),
        options: json!({}),
        include_packages: PackageSelector::Everything,
        exclude_packages: PackageSelector::Nothing,
        include_workspace_root: false,
        rule_type,
    }
}
