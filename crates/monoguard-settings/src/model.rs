use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SCHEMA_CONFIG_V1: &str = "monoguard.config.v1";

/// `monoguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MonoguardConfigV1 {
    /// Optional schema string for tooling (`monoguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Log every scope as it is checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// Rules, in execution order.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct RuleConfig {
    /// Rule type from the catalog, e.g. `package-entry`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Opaque identifier passed to the rule. Defaults to `<type>#<index>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name, also the stats grouping key. Defaults to `unknown`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Rule-specific options, validated by the rule type once per run.
    #[serde(default = "empty_options")]
    pub options: Value,

    /// Package-name globs the rule applies to. Absent means every package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_packages: Option<Vec<String>>,

    /// Package-name globs the rule never applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_packages: Option<Vec<String>>,

    /// Also check the workspace root. Defaults to `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_workspace_root: Option<bool>,
}

fn empty_options() -> Value {
    Value::Object(serde_json::Map::new())
}
