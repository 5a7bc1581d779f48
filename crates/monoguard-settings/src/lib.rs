//! Config parsing and rule resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{MonoguardConfigV1, RuleConfig, SCHEMA_CONFIG_V1};
pub use resolve::{Overrides, UNKNOWN_RULE_NAME};

use monoguard_engine::{ResolvedConfig, RuleCatalog};

/// Parse `monoguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<MonoguardConfigV1> {
    let cfg: MonoguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the rule list the engine runs: look up rule types, compile globs, fill defaults.
pub fn resolve_config(
    cfg: MonoguardConfigV1,
    catalog: &RuleCatalog,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, catalog, overrides)
}

/// JSON schema of the config file.
pub fn config_json_schema() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(MonoguardConfigV1);
    Ok(serde_json::to_string_pretty(&schema)?)
}
