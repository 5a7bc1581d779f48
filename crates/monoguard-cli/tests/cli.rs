//! End-to-end tests for `monoguard` against temporary npm workspaces.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn monoguard_cmd() -> Command {
    Command::cargo_bin("monoguard").unwrap()
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

fn workspace(config: &str) -> TempDir {
    let tmp = TempDir::new().expect("temp dir");
    let root = tmp.path();
    write_file(
        &root.join("package.json"),
        r#"{ "name": "acme", "private": true, "workspaces": ["packages/*"] }"#,
    );
    write_file(
        &root.join("packages/web/package.json"),
        r#"{ "name": "@acme/web", "license": "MIT", "dependencies": { "react": "18.0.0" } }"#,
    );
    write_file(
        &root.join("packages/ui/package.json"),
        r#"{ "name": "@acme/ui", "license": "ISC", "dependencies": { "lodash": "4.0.0" } }"#,
    );
    if !config.is_empty() {
        write_file(&root.join("monoguard.toml"), config);
    }
    tmp
}

const LICENSE_CONFIG: &str = r#"
[[rules]]
type = "package-entry"
name = "license"
options = { entries = { license = "MIT" } }
"#;

#[test]
fn check_without_config_passes() {
    let tmp = workspace("");
    monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("checked 3 scope(s), all passed"));
}

#[test]
fn violations_exit_with_code_two() {
    let tmp = workspace(LICENSE_CONFIG);
    monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path())
        .arg("check")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("@acme/ui ("))
        .stdout(predicate::str::contains(
            "  package.json: entry `license` does not match",
        ))
        .stdout(predicate::str::contains("@acme/web (").not());
}

#[test]
fn check_from_a_package_dir_only_checks_that_package() {
    let tmp = workspace(LICENSE_CONFIG);
    monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path().join("packages/web"))
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("checked 1 scope(s), all passed"));
}

#[test]
fn explicit_paths_select_containing_packages() {
    let tmp = workspace(LICENSE_CONFIG);
    monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path())
        .args(["check", "packages/ui/package.json"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("checked 1 scope(s), 1 failed"));
}

#[test]
fn stats_flag_prints_tables_and_rule_type_reports() {
    let tmp = workspace(
        r#"
[[rules]]
type = "banned-dependencies"
name = "no lodash"
options = { banned = ["lodash"] }

[[rules]]
type = "banned-dependencies"
name = "no moment"
options = { banned = ["moment"] }
"#,
    );
    let assert = monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path())
        .args(["check", "--stats"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Rule timing"))
        .stdout(predicate::str::contains("Glob matching"))
        .stdout(predicate::str::contains("scopes checked"));

    // Two rules share one rule type, so its report is printed once.
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert_eq!(
        stdout
            .matches("banned-dependencies: scanned 4 dependency entries")
            .count(),
        1
    );
}

#[test]
fn invalid_options_are_fatal() {
    let tmp = workspace(
        r#"
[[rules]]
type = "package-entry"
"#,
    );
    monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "monoguard error: invalid options for rule `unknown` (package-entry#0)",
        ));
}

#[test]
fn rule_error_still_prints_earlier_failures() {
    let config = format!(
        "{LICENSE_CONFIG}{}",
        r#"
[[rules]]
type = "file-contents"
include-packages = ["@acme/web"]
options = { file = "tsconfig.json", template-file = "templates/missing.json" }
"#
    );
    let tmp = workspace(&config);
    monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path())
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("@acme/ui ("))
        .stdout(predicate::str::contains(
            "  package.json: entry `license` does not match",
        ))
        .stderr(predicate::str::contains(
            "monoguard error: rule `unknown` (file-contents#1) raised an error while checking `@acme/web`",
        ));
}

#[test]
fn broken_package_manifest_is_reported_not_fatal() {
    let tmp = workspace("");
    write_file(&tmp.path().join("packages/ui/package.json"), "{ nope");
    monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("checked 3 scope(s), all passed"));
}

#[test]
fn unknown_rule_type_is_fatal() {
    let tmp = workspace("[[rules]]\ntype = \"nope\"\n");
    monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown rule type `nope`"));
}

#[test]
fn missing_workspace_is_fatal() {
    let tmp = TempDir::new().expect("temp dir");
    monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no workspace root found"));
}

#[test]
fn explicit_config_path_is_used() {
    let tmp = workspace("");
    write_file(&tmp.path().join("ci/monoguard.toml"), LICENSE_CONFIG);
    monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path())
        .args(["--config", "ci/monoguard.toml", "check"])
        .assert()
        .code(2);
}

#[test]
fn explicit_config_must_exist() {
    let tmp = workspace("");
    monoguard_cmd()
        .arg("--cwd")
        .arg(tmp.path())
        .args(["--config", "missing.toml", "check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("monoguard error: read"));
}

#[test]
fn list_rules_prints_builtin_types() {
    monoguard_cmd()
        .arg("list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("banned-dependencies"))
        .stdout(predicate::str::contains("file-contents"))
        .stdout(predicate::str::contains("package-entry"));
}

#[test]
fn schema_prints_config_schema() {
    monoguard_cmd()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("include-workspace-root"));
}
