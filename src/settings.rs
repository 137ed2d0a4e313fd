//! # Settings
//!
//! Key-value configuration loaded from a YAML file on disk. The file is an
//! arbitrary mapping: this crate only knows about the keys that command-line
//! flags can override (see [`keys`]), everything else is read by the
//! individual commands through [`Settings::get`] and friends.
//!
//! ## Example
//!
//! ```
//! use ghtorrent::settings::{keys, Settings};
//!
//! let mut settings = Settings::from_yaml_str("attach_ip: 0.0.0.0\n").unwrap();
//! let old = settings.override_value(keys::ATTACH_IP, "10.0.0.7");
//!
//! assert_eq!(old.as_ref().and_then(|v| v.as_str()), Some("0.0.0.0"));
//! assert_eq!(settings.get_str(keys::ATTACH_IP), Some("10.0.0.7"));
//! ```

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// Settings keys that the standard command-line flags can override.
pub mod keys {
    /// Local address used for outgoing requests (`--addr`).
    pub const ATTACH_IP: &str = "attach_ip";
    /// GitHub account name (`--username`).
    pub const GITHUB_USERNAME: &str = "github_username";
    /// GitHub account password (`--password`).
    pub const GITHUB_PASSWD: &str = "github_passwd";
}

/// Configuration loaded from the settings file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: Mapping,
}

impl Settings {
    /// Create empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse the YAML settings file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading settings from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_yaml::from_str(&content).map_err(|source| Error::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_value(value)
    }

    /// Parse settings from an in-memory YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
    }

    /// Build settings from a parsed YAML document.
    ///
    /// An empty document yields empty settings; any other non-mapping
    /// document is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Mapping(values) => Ok(Self { values }),
            Value::Null => Ok(Self::default()),
            other => Err(Error::SettingsFormat {
                found: yaml_type_name(&other),
            }),
        }
    }

    /// Look up a top-level setting.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Look up a top-level setting holding a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Deserialize a top-level setting into `T`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)
            .map(|value| serde_yaml::from_value(value.clone()))
            .transpose()
            .map_err(Error::Yaml)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The underlying YAML mapping.
    pub fn as_mapping(&self) -> &Mapping {
        &self.values
    }

    /// Merge a partial mapping into these settings.
    ///
    /// Nested mappings are merged key by key; any other value in `partial`
    /// replaces what was there before.
    pub fn merge_config_values(&mut self, partial: &Mapping) {
        merge_mappings(&mut self.values, partial, "");
    }

    /// Replace a single top-level setting, returning its previous value.
    pub fn override_value(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        let previous = self.values.get(key).cloned();
        let mut partial = Mapping::new();
        partial.insert(Value::String(key.to_string()), value.into());
        self.merge_config_values(&partial);
        previous
    }

    /// Serialize the settings back to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.values)?)
    }
}

impl From<Mapping> for Settings {
    fn from(values: Mapping) -> Self {
        Self { values }
    }
}

fn merge_mappings(target: &mut Mapping, source: &Mapping, path: &str) {
    for (key, value) in source {
        let key_str = match key {
            Value::String(s) => s.clone(),
            _ => format!("{:?}", key),
        };
        let new_path = if path.is_empty() {
            key_str
        } else {
            format!("{}.{}", path, key_str)
        };

        match (target.get_mut(key), value) {
            (Some(Value::Mapping(existing)), Value::Mapping(incoming)) => {
                merge_mappings(existing, incoming, &new_path);
            }
            (Some(existing), _) => {
                if existing.is_mapping() != value.is_mapping() {
                    warn!(
                        "Type mismatch for setting '{}': replacing {} with {}",
                        new_path,
                        yaml_type_name(existing),
                        yaml_type_name(value)
                    );
                }
                *existing = value.clone();
            }
            (None, _) => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Render a setting value the way it is shown in override messages.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Get a human-readable type name for a YAML value
pub fn yaml_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
