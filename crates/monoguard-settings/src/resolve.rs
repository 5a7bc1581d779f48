use crate::model::{MonoguardConfigV1, SCHEMA_CONFIG_V1};
use anyhow::Context;
use monoguard_engine::{PackageSelector, ResolvedConfig, ResolvedRule, RuleCatalog};

/// Grouping name for rules configured without a `name`.
pub const UNKNOWN_RULE_NAME: &str = "unknown";

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub verbose: Option<bool>,
}

pub fn resolve_config(
    cfg: MonoguardConfigV1,
    catalog: &RuleCatalog,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref() {
        if schema != SCHEMA_CONFIG_V1 {
            anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
        }
    }

    let mut rules = Vec::with_capacity(cfg.rules.len());
    for (index, rc) in cfg.rules.into_iter().enumerate() {
        let rule_type = catalog.get(&rc.kind).with_context(|| {
            format!(
                "unknown rule type `{}` (available: {})",
                rc.kind,
                catalog.kinds().collect::<Vec<_>>().join(", ")
            )
        })?;

        let id = rc.id.unwrap_or_else(|| format!("{}#{index}", rc.kind));

        let include_packages = PackageSelector::from_patterns(
            rc.include_packages.as_deref(),
            PackageSelector::Everything,
        )
        .with_context(|| format!("invalid include-packages glob for rule {id}"))?;
        let exclude_packages = PackageSelector::from_patterns(
            rc.exclude_packages.as_deref(),
            PackageSelector::Nothing,
        )
        .with_context(|| format!("invalid exclude-packages glob for rule {id}"))?;

        rules.push(ResolvedRule {
            id,
            name: rc.name.unwrap_or_else(|| UNKNOWN_RULE_NAME.to_string()),
            options: rc.options,
            include_packages,
            exclude_packages,
            include_workspace_root: rc.include_workspace_root.unwrap_or(false),
            rule_type,
        });
    }

    Ok(ResolvedConfig {
        rules,
        verbose: overrides.verbose.or(cfg.verbose).unwrap_or(false),
    })
}
