use crate::context::ScopeContext;
use crate::glob::PackageSelector;
use crate::rule::ResolvedRule;
use crate::stats::GlobCost;

/// Decide whether `rule` is skipped for `scope`.
///
/// Checks run cheapest first and the first match wins:
/// 1. the workspace root is skipped unless the rule opts in (no glob evaluated);
/// 2. a matching exclude list skips;
/// 3. an include list that does not match skips.
///
/// Glob evaluation time is charged to `cost`.
pub fn should_skip(scope: &ScopeContext<'_>, rule: &ResolvedRule, cost: &mut GlobCost) -> bool {
    if !rule.include_workspace_root && scope.is_workspace_root() {
        return true;
    }

    let name = scope.name();

    let excluded = match &rule.exclude_packages {
        PackageSelector::Nothing => false,
        PackageSelector::Everything => true,
        PackageSelector::Matching(globs) => cost.excludes.measure(|| globs.matches_any(name)),
    };
    if excluded {
        return true;
    }

    match &rule.include_packages {
        PackageSelector::Everything => false,
        PackageSelector::Nothing => true,
        PackageSelector::Matching(globs) => !cost.includes.measure(|| globs.matches_any(name)),
    }
}
