use crate::manifest::{PACKAGE_JSON, read_package_json, workspace_patterns};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Walk up from `cwd` to the nearest directory whose `package.json` declares `workspaces`.
///
/// Manifests that cannot be parsed are skipped, so a run started inside a broken
/// package still finds its workspace.
pub fn find_workspace_dir(cwd: &Utf8Path) -> anyhow::Result<Option<Utf8PathBuf>> {
    for dir in cwd.ancestors() {
        if !dir.join(PACKAGE_JSON).is_file() {
            continue;
        }
        let manifest = match read_package_json(dir) {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!(dir = %dir, error = %format!("{err:#}"), "skipping unreadable package.json");
                continue;
            }
        };
        if workspace_patterns(&manifest).is_some() {
            debug!(dir = %dir, "found workspace root");
            return Ok(Some(dir.to_path_buf()));
        }
    }
    Ok(None)
}

/// Discover package directories for the workspace rooted at `workspace_dir`.
///
/// Behavior:
/// - Every directory below the root that holds a `package.json` is a candidate.
/// - A candidate is a package when its relative path matches a `workspaces` glob and no
///   `!`-negated glob.
/// - `node_modules` and hidden directories are never descended into.
/// - The root itself is not a package. Output is sorted.
pub fn discover_packages(workspace_dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let manifest = read_package_json(workspace_dir)?;
    let patterns = workspace_patterns(&manifest)
        .with_context(|| format!("{} declares no workspaces", workspace_dir))?;

    let (negated, members): (Vec<String>, Vec<String>) =
        patterns.into_iter().partition(|p| p.starts_with('!'));
    let negated: Vec<String> = negated
        .into_iter()
        .map(|p| p.trim_start_matches('!').to_string())
        .collect();

    let member_set = build_globset(&members).context("compile workspaces globset")?;
    let negated_set = build_globset(&negated).context("compile negated workspaces globset")?;

    let mut out = Vec::new();
    for abs in WalkDir::new(workspace_dir)
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == PACKAGE_JSON)
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
    {
        let Some(dir) = abs.parent() else {
            continue;
        };
        let rel = dir
            .strip_prefix(workspace_dir)
            .unwrap_or(dir)
            .as_str()
            .replace('\\', "/");
        if rel.is_empty() {
            continue;
        }

        if member_set.is_match(&rel) && !negated_set.is_match(&rel) {
            out.push(dir.to_path_buf());
        }
    }

    // Stable order.
    out.sort();
    out.dedup();

    debug!(root = %workspace_dir, packages = out.len(), "discovered packages");
    Ok(out)
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "node_modules" || name.starts_with('.')
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        // `*` stays within one path segment, as npm and yarn expand it.
        let p = p.trim_start_matches("./").trim_end_matches('/');
        b.add(GlobBuilder::new(p).literal_separator(true).build()?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    fn rel_paths(root: &Utf8Path, dirs: &[Utf8PathBuf]) -> Vec<String> {
        dirs.iter()
            .map(|d| d.strip_prefix(root).expect("under root").to_string())
            .collect()
    }

    #[test]
    fn find_workspace_dir_walks_up_to_the_workspaces_manifest() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        write_file(&root.join("package.json"), r#"{ "workspaces": ["packages/*"] }"#);
        write_file(&root.join("packages/a/package.json"), r#"{ "name": "a" }"#);
        std::fs::create_dir_all(root.join("packages/a/src")).expect("mkdir");

        let found = find_workspace_dir(&root.join("packages/a/src")).expect("find");
        assert_eq!(found.as_deref(), Some(root.as_path()));
    }

    #[test]
    fn find_workspace_dir_walks_past_a_broken_package_manifest() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        write_file(&root.join("package.json"), r#"{ "workspaces": ["packages/*"] }"#);
        write_file(&root.join("packages/ui/package.json"), "{ nope");

        let found = find_workspace_dir(&root.join("packages/ui")).expect("find");
        assert_eq!(found.as_deref(), Some(root.as_path()));
    }

    #[test]
    fn discover_keeps_packages_with_broken_manifests() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        write_file(&root.join("package.json"), r#"{ "workspaces": ["packages/*"] }"#);
        write_file(&root.join("packages/ui/package.json"), "{ nope");
        write_file(&root.join("packages/web/package.json"), "{}");

        let dirs = discover_packages(&root).expect("discover");
        assert_eq!(rel_paths(&root, &dirs), vec!["packages/ui", "packages/web"]);
    }

    #[test]
    fn find_workspace_dir_without_workspaces_is_none() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let solo = root.join("solo");
        write_file(&solo.join("package.json"), r#"{ "name": "solo" }"#);

        // Ancestors of the temp dir are outside our control; only assert on the subtree.
        let found = find_workspace_dir(&solo).expect("find");
        assert!(found.is_none_or(|dir| !dir.starts_with(&root)));
    }

    #[test]
    fn discover_members_and_negations() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        write_file(
            &root.join("package.json"),
            r#"{ "workspaces": ["packages/*", "tools/**", "!packages/excluded"] }"#,
        );
        write_file(&root.join("packages/a/package.json"), r#"{ "name": "a" }"#);
        write_file(&root.join("packages/excluded/package.json"), "{}");
        write_file(&root.join("packages/a/nested/package.json"), "{}");
        write_file(&root.join("tools/util/deep/package.json"), "{}");
        write_file(&root.join("docs/package.json"), "{}");

        let dirs = discover_packages(&root).expect("discover");
        assert_eq!(
            rel_paths(&root, &dirs),
            vec!["packages/a", "tools/util/deep"]
        );
    }

    #[test]
    fn discover_accepts_object_form_and_skips_node_modules() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        write_file(
            &root.join("package.json"),
            r#"{ "workspaces": { "packages": ["./apps/*/"] } }"#,
        );
        write_file(&root.join("apps/web/package.json"), "{}");
        write_file(&root.join("apps/web/node_modules/dep/package.json"), "{}");
        write_file(&root.join("apps/.cache/package.json"), "{}");

        let dirs = discover_packages(&root).expect("discover");
        assert_eq!(rel_paths(&root, &dirs), vec!["apps/web"]);
    }

    #[test]
    fn discover_without_workspaces_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("package.json"), r#"{ "name": "solo" }"#);

        let err = discover_packages(&root).unwrap_err();
        assert!(err.to_string().contains("declares no workspaces"));
    }

    #[test]
    fn discover_invalid_glob_returns_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(&root.join("package.json"), r#"{ "workspaces": ["["] }"#);

        let err = discover_packages(&root).unwrap_err();
        assert!(err.to_string().contains("compile workspaces globset"));
    }

    #[test]
    fn pathbuf_to_utf8_rejects_invalid() {
        #[cfg(unix)]
        {
            use std::ffi::OsString;
            use std::os::unix::ffi::OsStringExt;
            let invalid = OsString::from_vec(vec![0xFF, 0xFE, 0xFD]);
            let path = PathBuf::from(invalid);
            assert!(pathbuf_to_utf8(path).is_none());
        }
    }
}
