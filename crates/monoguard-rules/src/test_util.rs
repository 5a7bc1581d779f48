use camino::{Utf8Path, Utf8PathBuf};
use monoguard_engine::{ResolvedConfig, RuleMeta, RuleType, Workspace};
use serde_json::Value;
use tempfile::TempDir;

pub(crate) fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
}

pub(crate) fn write_file(path: &Utf8Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

/// Run one check of `rule` against `<root>/<package>` and return the recorded messages.
pub(crate) fn check_package(
    rule: &dyn RuleType,
    root: &Utf8Path,
    package: &str,
    options: Value,
) -> anyhow::Result<Vec<String>> {
    let config = ResolvedConfig::default();
    let workspace = Workspace::new(&config, root.to_path_buf(), "root".to_string());
    let mut scope = workspace.package_scope(root.join(package), package.to_string());

    futures::executor::block_on(rule.check(&mut scope, &options, RuleMeta { id: "test" }))?;

    Ok(scope
        .failures()
        .iter()
        .map(|f| format!("{}: {}", f.file, f.message))
        .collect())
}
