use crate::options::{load_manifest, parse};
use anyhow::Context;
use async_trait::async_trait;
use monoguard_engine::{Failure, GlobList, RuleMeta, RuleType, ScopeContext};
use monoguard_repo::PACKAGE_JSON;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

const KIND: &str = "banned-dependencies";

const SECTIONS: [&str; 4] = [
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct BannedDependenciesOptions {
    /// Globs over dependency names.
    banned: Vec<String>,
}

impl BannedDependenciesOptions {
    fn globs(&self) -> anyhow::Result<GlobList> {
        GlobList::new(self.banned.as_slice()).context("compile banned globs")
    }
}

/// No dependency of the package may match a banned glob.
///
/// Compiled glob lists are cached per `banned` list, so each configured rule compiles
/// its globs once per run rather than once per scope.
#[derive(Debug, Default)]
pub struct BannedDependencies {
    scanned: AtomicU64,
    compiled: Mutex<HashMap<Vec<String>, Arc<GlobList>>>,
}

impl BannedDependencies {
    /// Dependency entries looked at so far in this run.
    pub fn scanned(&self) -> u64 {
        self.scanned.load(Ordering::Relaxed)
    }

    fn globs(&self, opts: BannedDependenciesOptions) -> anyhow::Result<Arc<GlobList>> {
        let mut compiled = self
            .compiled
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(globs) = compiled.get(&opts.banned) {
            return Ok(Arc::clone(globs));
        }
        let globs = Arc::new(opts.globs()?);
        compiled.insert(opts.banned, Arc::clone(&globs));
        Ok(globs)
    }

    #[cfg(test)]
    fn compiled_lists(&self) -> usize {
        self.compiled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl RuleType for BannedDependencies {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn description(&self) -> &'static str {
        "dependencies must not match any banned name glob"
    }

    fn validate_options(&self, options: &Value) -> anyhow::Result<()> {
        let opts: BannedDependenciesOptions = parse(KIND, options)?;
        if opts.banned.is_empty() {
            anyhow::bail!("{KIND} needs at least one `banned` glob");
        }
        opts.globs()?;
        Ok(())
    }

    async fn check(
        &self,
        scope: &mut ScopeContext<'_>,
        options: &Value,
        meta: RuleMeta<'_>,
    ) -> anyhow::Result<()> {
        let opts: BannedDependenciesOptions = parse(KIND, options)?;
        let banned = self.globs(opts)?;

        let manifest = match load_manifest(scope.dir()) {
            Ok(Some(manifest)) => manifest,
            Ok(None) => return Ok(()),
            Err(failure) => {
                scope.add_error(failure);
                return Ok(());
            }
        };

        let mut scanned = 0u64;
        for section in SECTIONS {
            let Some(deps) = manifest.get(section).and_then(Value::as_object) else {
                continue;
            };
            for name in deps.keys() {
                scanned += 1;
                if banned.matches_any(name) {
                    scope.add_error(Failure::new(
                        PACKAGE_JSON,
                        format!("`{name}` is banned (found in {section})"),
                    ));
                }
            }
        }

        trace!(rule = meta.id, scope = %scope.name(), scanned, "scanned dependencies");
        self.scanned.fetch_add(scanned, Ordering::Relaxed);
        Ok(())
    }

    fn stats_report(&self) -> Option<String> {
        Some(format!(
            "{KIND}: scanned {} dependency entries",
            self.scanned()
        ))
    }
}
