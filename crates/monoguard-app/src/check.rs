//! The `check` use case: resolve config, run the engine, render stats.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use monoguard_engine::{CheckRequest, Discovery, RunError, ScopeReport};
use monoguard_settings::{MonoguardConfigV1, Overrides};
use tracing::{debug, info};

/// Config file looked up at the workspace root.
pub const CONFIG_FILE_NAME: &str = "monoguard.toml";

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Absolute working directory.
    pub cwd: &'a Utf8Path,
    /// Parsed config (default when no file was found).
    pub config: MonoguardConfigV1,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Explicit paths; their containing directories are checked.
    pub paths: Option<Vec<Utf8PathBuf>>,
    /// Render timing tables and rule-type stats.
    pub report_stats: bool,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub passed: bool,
    /// Sealed scope reports, in check order.
    pub reports: Vec<ScopeReport>,
    /// Rendered stats, when requested.
    pub stats: Option<String>,
}

/// Parse config text. Blank text yields the default (no rules).
pub fn parse_config(text: &str) -> anyhow::Result<MonoguardConfigV1> {
    if text.trim().is_empty() {
        return Ok(MonoguardConfigV1::default());
    }
    monoguard_settings::parse_config_toml(text).context("parse config")
}

/// `monoguard.toml` at the workspace root containing `cwd`, if both exist.
pub fn locate_config(
    cwd: &Utf8Path,
    discovery: &dyn Discovery,
) -> anyhow::Result<Option<Utf8PathBuf>> {
    let Some(root) = discovery.find_workspace_dir(cwd)? else {
        return Ok(None);
    };
    let path = root.join(CONFIG_FILE_NAME);
    Ok(path.is_file().then_some(path))
}

/// Run the check use case against the built-in rule catalog.
pub async fn run_check(
    input: CheckInput<'_>,
    discovery: &dyn Discovery,
) -> anyhow::Result<CheckOutput> {
    let catalog = monoguard_rules::builtin_catalog();
    let resolved = monoguard_settings::resolve_config(input.config, &catalog, input.overrides)
        .context("resolve config")?;
    debug!(rules = resolved.rules.len(), verbose = resolved.verbose, "resolved config");

    let request = CheckRequest {
        cwd: input.cwd,
        paths: input.paths.as_deref(),
        report_stats: input.report_stats,
    };
    let outcome = monoguard_engine::check(&resolved, discovery, request).await?;

    let stats = input
        .report_stats
        .then(|| crate::stats::render_stats(&outcome.stats, &outcome.rule_type_stats));

    info!(
        passed = outcome.passed,
        scopes = outcome.reports.len(),
        "check finished"
    );

    Ok(CheckOutput {
        passed: outcome.passed,
        reports: outcome.reports,
        stats,
    })
}

/// Reports sealed before a run aborted with `err`; empty for errors raised before
/// any scope was checked.
pub fn partial_reports(err: &anyhow::Error) -> &[ScopeReport] {
    err.downcast_ref::<RunError>()
        .map(RunError::partial_reports)
        .unwrap_or(&[])
}

/// Process exit code for a finished check.
pub fn exit_code(passed: bool) -> i32 {
    if passed { 0 } else { 2 }
}
