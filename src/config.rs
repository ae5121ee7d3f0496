//! Variable schema handling for scaffold templates.
//! Parses the per-run configuration file into an ordered set of prompt definitions.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default per-run configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "./scaffold.yaml";

/// File stem reserved for the process-wide settings document.
pub const RESERVED_CONFIG_NAME: &str = "base";

/// Keys starting with this prefix are never prompted.
pub const PRIVATE_KEY_PREFIX: char = '_';

/// Document formats accepted for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML, also the format of the process-wide settings.
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Some(Self::Yaml)
            }
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            _ => None,
        }
    }
}

/// Default value of a prompt definition.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Text(s) => write!(f, "{s}"),
            DefaultValue::Integer(i) => write!(f, "{i}"),
            DefaultValue::Real(r) => write!(f, "{r}"),
            DefaultValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// How the value of a definition is obtained from the user.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptKind {
    Text,
    Integer,
    Real,
    Boolean,
    /// One of the listed options, already coerced to strings.
    SingleChoice(Vec<String>),
}

/// A single configurable variable.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptDefinition {
    pub key: String,
    pub order: i64,
    pub default: DefaultValue,
    pub kind: PromptKind,
    /// Advisory, not acted upon.
    pub allow_edit: bool,
    /// Advisory, not acted upon.
    pub hide_entered: bool,
}

impl PromptDefinition {
    /// Private definitions take their default verbatim.
    pub fn is_private(&self) -> bool {
        self.key.starts_with(PRIVATE_KEY_PREFIX)
    }
}

/// Ordered prompt definitions loaded from one configuration file.
#[derive(Debug, Clone)]
pub struct Schema {
    path: PathBuf,
    prompts: IndexMap<String, PromptDefinition>,
}

impl Schema {
    /// Path of the file this schema was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Definitions in ascending `order`.
    pub fn definitions(&self) -> impl Iterator<Item = &PromptDefinition> {
        self.prompts.values()
    }

    pub fn get(&self, key: &str) -> Option<&PromptDefinition> {
        self.prompts.get(key)
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    prompt: Option<IndexMap<String, RawPrompt>>,
}

#[derive(Debug, Deserialize)]
struct RawPrompt {
    #[serde(default)]
    order: i64,
    #[serde(default)]
    default: serde_json::Value,
    #[serde(default)]
    options: Vec<serde_json::Value>,
    #[serde(default)]
    allow_edit: bool,
    #[serde(default)]
    hide_entered: bool,
}

/// Rejects configuration names that collide with the process-wide settings.
///
/// # Errors
/// * `Error::ConfigConflict` for a YAML file named `base`
pub fn check_config_name(path: &Path) -> Result<()> {
    let stem = path.file_stem().and_then(|s| s.to_str());
    if stem == Some(RESERVED_CONFIG_NAME) && ConfigFormat::from_path(path) == Some(ConfigFormat::Yaml)
    {
        return Err(Error::ConfigConflict { path: path.display().to_string() });
    }
    Ok(())
}

/// Loads and parses a configuration file into a [`Schema`].
///
/// # Errors
/// * `Error::ConfigConflict` if the file is named like the settings document
/// * `Error::ConfigNotFound` if the file cannot be read
/// * `Error::ConfigMalformed` if the document or one of its definitions is invalid
pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<Schema> {
    let path = path.as_ref();
    check_config_name(path)?;

    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(|source| Error::ConfigNotFound { path: path.display().to_string(), source })?;

    let format = ConfigFormat::from_path(path).ok_or_else(|| Error::ConfigMalformed {
        path: path.display().to_string(),
        reason: "unsupported configuration format (expected .yaml, .yml or .json)".to_string(),
    })?;

    parse_schema(path, &content, format)
}

/// Parses configuration content that was already read from `path`.
pub fn parse_schema(path: &Path, content: &str, format: ConfigFormat) -> Result<Schema> {
    let malformed = |reason: String| Error::ConfigMalformed { path: path.display().to_string(), reason };

    let raw: RawConfig = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| malformed(e.to_string()))?,
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?,
    };

    let raw_prompts = raw.prompt.unwrap_or_else(|| {
        warn!("Configuration {} has no 'prompt' section", path.display());
        IndexMap::new()
    });

    let mut definitions = Vec::with_capacity(raw_prompts.len());
    for (key, raw_prompt) in raw_prompts {
        let definition = into_definition(key, raw_prompt).map_err(malformed)?;
        definitions.push(definition);
    }

    // Stable: equal orders keep their position in the document.
    definitions.sort_by_key(|definition| definition.order);

    let prompts = definitions
        .into_iter()
        .map(|definition| (definition.key.clone(), definition))
        .collect();

    Ok(Schema { path: path.to_path_buf(), prompts })
}

fn into_definition(key: String, raw: RawPrompt) -> std::result::Result<PromptDefinition, String> {
    let default = match raw.default {
        serde_json::Value::String(s) => DefaultValue::Text(s),
        serde_json::Value::Bool(b) => DefaultValue::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => DefaultValue::Integer(i),
            None => DefaultValue::Real(n.as_f64().ok_or_else(|| {
                format!("default value of '{key}' is not a representable number")
            })?),
        },
        serde_json::Value::Null => return Err(format!("'{key}' has no default value")),
        other => {
            return Err(format!(
                "default value of '{key}' has unsupported type {}",
                value_type_name(&other)
            ))
        }
    };

    let kind = if !raw.options.is_empty() {
        PromptKind::SingleChoice(raw.options.iter().map(option_to_string).collect())
    } else {
        match default {
            DefaultValue::Text(_) => PromptKind::Text,
            DefaultValue::Integer(_) => PromptKind::Integer,
            DefaultValue::Real(_) => PromptKind::Real,
            DefaultValue::Boolean(_) => PromptKind::Boolean,
        }
    };

    Ok(PromptDefinition {
        key,
        order: raw.order,
        default,
        kind,
        allow_edit: raw.allow_edit,
        hide_entered: raw.hide_entered,
    })
}

/// Coerces a heterogeneous option to its display string.
fn option_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "map",
    }
}
