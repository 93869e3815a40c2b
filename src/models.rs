use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::utils::{Logger, Result};

/// Bundler mode, serialized as the bundler's fixed mode strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn from_dev_flag(dev: bool) -> Self {
        if dev {
            Mode::Development
        } else {
            Mode::Production
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

/// Source map setting (`devtool` in the emitted schema).
///
/// The bundler expects either a named kind or the literal `false`, so
/// serialization is hand-rolled rather than derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Devtool {
    SourceMap,
    Disabled,
}

impl Serialize for Devtool {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Devtool::SourceMap => serializer.serialize_str("source-map"),
            Devtool::Disabled => serializer.serialize_bool(false),
        }
    }
}

/// A `resolve.fallback` value: either a flag (usually `false` to stub a
/// module out) or a path to a shim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Fallback {
    Flag(bool),
    Shim(String),
}

impl From<bool> for Fallback {
    fn from(flag: bool) -> Self {
        Fallback::Flag(flag)
    }
}

impl From<&str> for Fallback {
    fn from(shim: &str) -> Self {
        Fallback::Shim(shim.to_string())
    }
}

impl From<String> for Fallback {
    fn from(shim: String) -> Self {
        Fallback::Shim(shim)
    }
}

/// Output location and naming for built files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub path: PathBuf,
    pub filename: String,
    pub public_path: String,
    pub clean: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WatchOptions {
    pub ignored: Vec<String>,
}

/// The `resolve` section: path aliases and module fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolve {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub alias: IndexMap<String, PathBuf>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub fallback: IndexMap<String, Fallback>,
}

impl Resolve {
    pub fn is_empty(&self) -> bool {
        self.alias.is_empty() && self.fallback.is_empty()
    }
}

/// The `module` section: an append-only list of opaque rule descriptors.
/// Order is preserved; first-match-wins is the consuming bundler's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModuleSection {
    pub rules: Vec<Value>,
}

impl ModuleSection {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub error_details: bool,
}

/// The configuration record handed to the bundler.
///
/// Every field is absent until a mutator sets it; absent fields are skipped
/// on serialization so the emitted JSON only carries what was configured.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool: Option<Devtool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_options: Option<WatchOptions>,

    /// Entry name to ordered, duplicate-free absolute paths.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub entry: IndexMap<String, Vec<PathBuf>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,

    #[serde(skip_serializing_if = "Resolve::is_empty")]
    pub resolve: Resolve,

    #[serde(skip_serializing_if = "ModuleSection::is_empty")]
    pub module: ModuleSection,

    /// Append-only opaque plugin descriptors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<Value>,

    pub stats: Stats,
}

impl ConfigRecord {
    /// Serialize the record into the bundler's JSON schema.
    pub fn to_json_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Pretty-printed JSON, suitable for a generated config file.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the record as pretty JSON to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json)?;
        Logger::debug(&format!("Wrote bundler config to {}", path.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_record_serializes_stats_only() {
        let record = ConfigRecord::default();
        let value = record.to_json_value().unwrap();

        assert_eq!(value, json!({"stats": {"errorDetails": false}}));
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_value(Mode::Development).unwrap(),
            json!("development")
        );
        assert_eq!(
            serde_json::to_value(Mode::Production).unwrap(),
            json!("production")
        );
    }

    #[test]
    fn test_devtool_serialization() {
        assert_eq!(
            serde_json::to_value(Devtool::SourceMap).unwrap(),
            json!("source-map")
        );
        assert_eq!(serde_json::to_value(Devtool::Disabled).unwrap(), json!(false));
    }

    #[test]
    fn test_fallback_serialization() {
        assert_eq!(serde_json::to_value(Fallback::from(false)).unwrap(), json!(false));
        assert_eq!(
            serde_json::to_value(Fallback::from("crypto-browserify")).unwrap(),
            json!("crypto-browserify")
        );
    }

    #[test]
    fn test_output_uses_camel_case_keys() {
        let output = Output {
            path: PathBuf::from("/project/public/resources/build/js/base"),
            filename: "[name].js".to_string(),
            public_path: "/resources/".to_string(),
            clean: true,
        };
        let value = serde_json::to_value(&output).unwrap();

        assert!(value.get("publicPath").is_some());
        assert_eq!(value["clean"], json!(true));
    }
}
