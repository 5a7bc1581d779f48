//! Run-scoped timing statistics.
//!
//! Everything here belongs to a single run: the orchestrator creates a fresh [`RunStats`],
//! threads it through every scope, and hands it back in the outcome.

use std::collections::BTreeMap;
use std::time::Duration;

/// Timing bucket for every rule sharing one display name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleTiming {
    pub name: String,
    /// Time spent in this rule, skip decisions included.
    pub total_time: Duration,
    /// Scopes this rule was considered for, skipped or not.
    pub executions: u64,
    /// How many of `executions` were skipped.
    pub skipped: u64,
    /// The part of `total_time` spent deciding to skip.
    pub skip_time: Duration,
}

impl RuleTiming {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn record_check(&mut self, elapsed: Duration) {
        self.total_time += elapsed;
    }

    pub(crate) fn record_skip(&mut self, elapsed: Duration) {
        self.total_time += elapsed;
        self.skip_time += elapsed;
        self.skipped += 1;
    }

    pub fn average_time(&self) -> Duration {
        match u32::try_from(self.executions) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total_time / n,
            Err(_) => Duration::from_secs_f64(self.total_time.as_secs_f64() / self.executions as f64),
        }
    }
}

/// Accumulated cost of evaluating one kind of glob list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobTiming {
    pub total_time: Duration,
    pub evaluations: u64,
}

impl GlobTiming {
    pub(crate) fn measure(&mut self, matcher: impl FnOnce() -> bool) -> bool {
        let started = std::time::Instant::now();
        let matched = matcher();
        self.total_time += started.elapsed();
        self.evaluations += 1;
        matched
    }
}

/// Time spent matching include and exclude globs across a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobCost {
    pub includes: GlobTiming,
    pub excludes: GlobTiming,
}

impl GlobCost {
    pub fn total_time(&self) -> Duration {
        self.includes.total_time + self.excludes.total_time
    }
}

#[derive(Clone, Debug, Default)]
pub struct RunStats {
    /// Buckets keyed by rule name.
    pub rules: BTreeMap<String, RuleTiming>,
    pub globs: GlobCost,
    pub scopes_checked: u64,
    /// Time spent validating every rule's options once.
    pub config_validation: Duration,
    pub total_time: Duration,
}

impl RunStats {
    pub fn total_executions(&self) -> u64 {
        self.rules.values().map(|t| t.executions).sum()
    }

    /// Buckets sorted ascending by total time; ties by name.
    pub fn rules_by_total_time(&self) -> Vec<&RuleTiming> {
        let mut rows: Vec<&RuleTiming> = self.rules.values().collect();
        rows.sort_by(|a, b| a.total_time.cmp(&b.total_time).then(a.name.cmp(&b.name)));
        rows
    }

    /// What validation would have cost if options were re-validated for every scope.
    pub fn per_scope_validation_estimate(&self) -> Duration {
        let scopes = u32::try_from(self.scopes_checked).unwrap_or(u32::MAX);
        self.config_validation.saturating_mul(scopes)
    }
}

/// Output of one rule type's stats hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTypeStats {
    pub kind: &'static str,
    pub report: String,
}
