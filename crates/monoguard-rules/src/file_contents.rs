use crate::options::parse;
use anyhow::Context;
use async_trait::async_trait;
use camino::Utf8Path;
use monoguard_engine::{Failure, RuleMeta, RuleType, ScopeContext};
use serde::Deserialize;
use serde_json::Value;
use std::io::ErrorKind;

const KIND: &str = "file-contents";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct FileContentsOptions {
    /// Path relative to the scope directory.
    file: String,
    template: Option<String>,
    /// Path relative to the workspace root.
    template_file: Option<String>,
}

/// A file must equal a template, or must not exist when no template is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileContents;

impl FileContents {
    fn expected(opts: &FileContentsOptions, workspace_dir: &Utf8Path) -> anyhow::Result<Option<String>> {
        if let Some(template) = &opts.template {
            return Ok(Some(template.clone()));
        }
        let Some(template_file) = &opts.template_file else {
            return Ok(None);
        };
        let path = workspace_dir.join(template_file);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read template {}", path))?;
        Ok(Some(text))
    }
}

fn read_optional(path: &Utf8Path) -> anyhow::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("read {}", path)),
    }
}

#[async_trait]
impl RuleType for FileContents {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn description(&self) -> &'static str {
        "a file must match a template, or be absent"
    }

    fn validate_options(&self, options: &Value) -> anyhow::Result<()> {
        let opts: FileContentsOptions = parse(KIND, options)?;
        if opts.file.trim().is_empty() {
            anyhow::bail!("{KIND} needs a non-empty `file`");
        }
        if opts.template.is_some() && opts.template_file.is_some() {
            anyhow::bail!("{KIND} takes `template` or `template-file`, not both");
        }
        Ok(())
    }

    async fn check(
        &self,
        scope: &mut ScopeContext<'_>,
        options: &Value,
        _meta: RuleMeta<'_>,
    ) -> anyhow::Result<()> {
        let opts: FileContentsOptions = parse(KIND, options)?;
        let expected = Self::expected(&opts, scope.workspace().dir())?;
        let actual = read_optional(&scope.dir().join(&opts.file))?;

        match (expected, actual) {
            (Some(_), None) => {
                scope.add_error(Failure::new(opts.file.as_str(), "expected file to exist"));
            }
            (Some(expected), Some(actual)) if expected != actual => {
                scope.add_error(
                    Failure::new(opts.file.as_str(), "file does not match template")
                        .with_long_message(format!(
                            "expected:\n{expected}\nactual:\n{actual}"
                        )),
                );
            }
            (None, Some(_)) => {
                scope.add_error(Failure::new(opts.file.as_str(), "file should not exist"));
            }
            _ => {}
        }
        Ok(())
    }
}
