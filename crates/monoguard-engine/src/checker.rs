use crate::context::ScopeContext;
use crate::error::RunError;
use crate::rule::{ResolvedRule, RuleMeta};
use crate::skip::should_skip;
use crate::stats::{RuleTiming, RunStats};
use std::time::Instant;
use tracing::{debug, info, trace};

/// Run every rule against one scope, in declared order, then seal the scope.
///
/// Each check is awaited before the next one starts. Time spent deciding to skip a rule
/// is charged to that rule's bucket. A check that returns an error aborts immediately
/// and the scope is not sealed; the caller fills in the reports sealed so far.
pub async fn check_package(
    mut scope: ScopeContext<'_>,
    rules: &[ResolvedRule],
    stats: &mut RunStats,
) -> Result<(), RunError> {
    if scope.config().verbose {
        info!(scope = scope.name(), dir = %scope.dir(), "checking");
    } else {
        debug!(scope = scope.name(), dir = %scope.dir(), "checking");
    }

    for rule in rules {
        let timing = stats
            .rules
            .entry(rule.name.clone())
            .or_insert_with(|| RuleTiming::new(&rule.name));
        timing.executions += 1;

        let started = Instant::now();
        if should_skip(&scope, rule, &mut stats.globs) {
            timing.record_skip(started.elapsed());
            trace!(rule = %rule.name, scope = scope.name(), "skipped");
            continue;
        }

        let result = rule
            .rule_type
            .check(&mut scope, &rule.options, RuleMeta { id: &rule.id })
            .await;
        timing.record_check(started.elapsed());

        result.map_err(|source| RunError::RuleCheck {
            rule: rule.name.clone(),
            id: rule.id.clone(),
            scope: scope.name().to_string(),
            source: source.into(),
            reports: Vec::new(),
        })?;
    }

    scope.finish();
    Ok(())
}
