use crate::options::{load_manifest, parse};
use async_trait::async_trait;
use monoguard_engine::{Failure, RuleMeta, RuleType, ScopeContext};
use monoguard_repo::PACKAGE_JSON;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

const KIND: &str = "package-entry";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PackageEntryOptions {
    /// Top-level keys that must be present with exactly this value.
    #[serde(default)]
    entries: BTreeMap<String, Value>,
    /// Top-level keys that must be present with any value.
    #[serde(default)]
    entries_exist: Vec<String>,
}

/// `package.json` must contain the configured entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct PackageEntry;

#[async_trait]
impl RuleType for PackageEntry {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn description(&self) -> &'static str {
        "package.json must contain the given entries"
    }

    fn validate_options(&self, options: &Value) -> anyhow::Result<()> {
        let opts: PackageEntryOptions = parse(KIND, options)?;
        if opts.entries.is_empty() && opts.entries_exist.is_empty() {
            anyhow::bail!("{KIND} needs `entries` or `entries-exist`");
        }
        Ok(())
    }

    async fn check(
        &self,
        scope: &mut ScopeContext<'_>,
        options: &Value,
        _meta: RuleMeta<'_>,
    ) -> anyhow::Result<()> {
        let opts: PackageEntryOptions = parse(KIND, options)?;

        let manifest = match load_manifest(scope.dir()) {
            Ok(Some(manifest)) => manifest,
            Ok(None) => {
                scope.add_error(Failure::new(PACKAGE_JSON, "package.json is missing"));
                return Ok(());
            }
            Err(failure) => {
                scope.add_error(failure);
                return Ok(());
            }
        };

        for (key, expected) in &opts.entries {
            match manifest.get(key) {
                None => scope.add_error(
                    Failure::new(PACKAGE_JSON, format!("missing entry `{key}`"))
                        .with_long_message(format!("expected: {expected}")),
                ),
                Some(actual) if actual != expected => scope.add_error(
                    Failure::new(PACKAGE_JSON, format!("entry `{key}` does not match"))
                        .with_long_message(format!("expected: {expected}\nactual:   {actual}")),
                ),
                Some(_) => {}
            }
        }

        for key in &opts.entries_exist {
            if manifest.get(key).is_none() {
                scope.add_error(Failure::new(PACKAGE_JSON, format!("missing entry `{key}`")));
            }
        }

        Ok(())
    }
}
