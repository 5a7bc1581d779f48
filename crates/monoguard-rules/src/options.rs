use anyhow::Context;
use camino::Utf8Path;
use monoguard_engine::Failure;
use monoguard_repo::{PACKAGE_JSON, read_package_json};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize a rule's options into its typed form.
pub(crate) fn parse<T: DeserializeOwned>(kind: &str, options: &Value) -> anyhow::Result<T> {
    serde_json::from_value(options.clone()).with_context(|| format!("{kind} options"))
}

/// Load the scope's `package.json`.
///
/// `Ok(None)` when there is none; `Err` carries a failure to record when it cannot be parsed.
pub(crate) fn load_manifest(dir: &Utf8Path) -> Result<Option<Value>, Failure> {
    if !dir.join(PACKAGE_JSON).is_file() {
        return Ok(None);
    }
    read_package_json(dir).map(Some).map_err(|err| {
        Failure::new(PACKAGE_JSON, "package.json could not be read")
            .with_long_message(format!("{err:#}"))
    })
}
