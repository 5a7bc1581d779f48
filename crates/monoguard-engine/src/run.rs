use crate::checker::check_package;
use crate::context::{ScopeReport, Workspace};
use crate::discovery::Discovery;
use crate::error::RunError;
use crate::rule::ResolvedConfig;
use crate::stats::{RuleTypeStats, RunStats};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info};

/// What to check and how to report it.
#[derive(Clone, Copy, Debug)]
pub struct CheckRequest<'a> {
    /// Absolute working directory.
    pub cwd: &'a Utf8Path,
    /// Explicit files whose containing directories should be checked.
    pub paths: Option<&'a [Utf8PathBuf]>,
    /// Collect rule-type stats hooks after the run.
    pub report_stats: bool,
}

#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// `true` when no checked scope failed.
    pub passed: bool,
    pub reports: Vec<ScopeReport>,
    pub stats: RunStats,
    /// One entry per distinct rule type with something to report; empty unless requested.
    pub rule_type_stats: Vec<RuleTypeStats>,
}

enum Target {
    WorkspaceRoot,
    Package(Utf8PathBuf),
}

/// Check the scopes selected by `request` against every rule in `config`.
///
/// Fatal problems (no workspace, invalid rule options, discovery failures, rules that
/// error) abort the run before or during checking. Rule violations do not: they end up
/// in the outcome's reports and make `passed` false. A rule error carries the reports
/// sealed before it, see [`RunError::partial_reports`].
pub async fn check(
    config: &ResolvedConfig,
    discovery: &dyn Discovery,
    request: CheckRequest<'_>,
) -> Result<RunOutcome, RunError> {
    let started = Instant::now();

    let workspace_dir = discovery
        .find_workspace_dir(request.cwd)
        .map_err(RunError::discovery)?
        .ok_or_else(|| RunError::WorkspaceNotFound {
            cwd: request.cwd.to_path_buf(),
        })?;
    let workspace_name = discovery
        .package_name(&workspace_dir)
        .map_err(RunError::discovery)?;
    debug!(dir = %workspace_dir, name = %workspace_name, "workspace root");

    let workspace = Workspace::new(config, workspace_dir, workspace_name);

    let mut stats = RunStats::default();

    let validation_started = Instant::now();
    validate_options(config)?;
    stats.config_validation = validation_started.elapsed();

    let targets = resolve_targets(&workspace, discovery, &request)?;

    for target in targets {
        let scope = match target {
            Target::WorkspaceRoot => workspace.root_scope(),
            Target::Package(dir) => {
                let name = discovery.package_name(&dir).map_err(RunError::discovery)?;
                workspace.package_scope(dir, name)
            }
        };
        let checked = check_package(scope, &config.rules, &mut stats).await;
        if let Err(mut err) = checked {
            if let RunError::RuleCheck { reports, .. } = &mut err {
                *reports = workspace.into_reports();
            }
            return Err(err);
        }
        stats.scopes_checked += 1;
    }

    let rule_type_stats = if request.report_stats {
        collect_rule_type_stats(config)
    } else {
        Vec::new()
    };

    stats.total_time = started.elapsed();
    let passed = !workspace.failed();
    info!(
        scopes = stats.scopes_checked,
        rules = config.rules.len(),
        passed,
        "run finished"
    );

    Ok(RunOutcome {
        passed,
        reports: workspace.into_reports(),
        stats,
        rule_type_stats,
    })
}

fn validate_options(config: &ResolvedConfig) -> Result<(), RunError> {
    for rule in &config.rules {
        rule.rule_type
            .validate_options(&rule.options)
            .map_err(|source| RunError::InvalidOptions {
                rule: rule.name.clone(),
                id: rule.id.clone(),
                source: source.into(),
            })?;
    }
    Ok(())
}

fn resolve_targets(
    workspace: &Workspace<'_>,
    discovery: &dyn Discovery,
    request: &CheckRequest<'_>,
) -> Result<Vec<Target>, RunError> {
    let root = workspace.dir();

    if let Some(paths) = request.paths {
        return Ok(paths
            .iter()
            .map(|path| {
                let dir = containing_dir(request.cwd, path);
                if dir.as_path() == root {
                    Target::WorkspaceRoot
                } else {
                    Target::Package(dir)
                }
            })
            .collect());
    }

    if normalize(request.cwd).as_path() == root {
        let mut targets = vec![Target::WorkspaceRoot];
        targets.extend(
            workspace
                .package_dirs(discovery)
                .map_err(RunError::discovery)?
                .into_iter()
                .map(Target::Package),
        );
        return Ok(targets);
    }

    Ok(vec![Target::Package(normalize(request.cwd))])
}

/// The directory containing `path`, resolved against `cwd`.
fn containing_dir(cwd: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    let absolute = normalize(&cwd.join(path));
    match absolute.parent() {
        Some(parent) => parent.to_path_buf(),
        None => absolute,
    }
}

/// Drop `.` segments and resolve `..` lexically.
fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    use camino::Utf8Component;

    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_str()),
        }
    }
    out
}

/// Ask each distinct rule type for its stats exactly once.
fn collect_rule_type_stats(config: &ResolvedConfig) -> Vec<RuleTypeStats> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for rule in &config.rules {
        let kind = rule.rule_type.kind();
        if !seen.insert(kind) {
            continue;
        }
        if let Some(report) = rule.rule_type.stats_report() {
            out.push(RuleTypeStats { kind, report });
        }
    }
    out
}
