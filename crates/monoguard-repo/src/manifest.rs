use anyhow::Context;
use camino::Utf8Path;
use serde_json::Value;
use tracing::warn;

pub const PACKAGE_JSON: &str = "package.json";

/// Read and parse `<dir>/package.json`.
pub fn read_package_json(dir: &Utf8Path) -> anyhow::Result<Value> {
    let path = dir.join(PACKAGE_JSON);
    let text = std::fs::read_to_string(&path).with_context(|| format!("read {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path))
}

/// The `workspaces` globs of a manifest, in either the array or `{ packages = [...] }` form.
pub fn workspace_patterns(manifest: &Value) -> Option<Vec<String>> {
    let workspaces = manifest.get("workspaces")?;
    let list = match workspaces {
        Value::Array(items) => items,
        Value::Object(obj) => obj.get("packages")?.as_array()?,
        _ => return None,
    };
    Some(
        list.iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
    )
}

/// The package name at `dir`: the manifest's `name`, or the directory name when the
/// manifest is missing, unreadable or unnamed.
///
/// A broken manifest is left for the rules to report against the package's scope.
pub fn package_name(dir: &Utf8Path) -> anyhow::Result<String> {
    let fallback = || dir.file_name().unwrap_or(dir.as_str()).to_string();

    if !dir.join(PACKAGE_JSON).is_file() {
        warn!(dir = %dir, "no package.json; using directory name");
        return Ok(fallback());
    }

    let manifest = match read_package_json(dir) {
        Ok(manifest) => manifest,
        Err(err) => {
            warn!(dir = %dir, error = %format!("{err:#}"), "unreadable package.json; using directory name");
            return Ok(fallback());
        }
    };
    Ok(manifest
        .get("name")
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .unwrap_or_else(fallback))
}
