//! External configuration for a container.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Bindings and parameter values loaded from a YAML or JSON document.
///
/// ```yaml
/// bindings:
///   Logger: ConsoleLogger
/// parameters:
///   Database.dsn: "sqlite://quiz.db"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
  /// Abstract identifier to concrete identifier.
  pub bindings: HashMap<String, String>,
  /// `"<ConcreteId>.<parameter>"` to the value injected for that parameter.
  pub parameters: HashMap<String, Value>,
}

impl ContainerConfig {
  pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
    Ok(serde_yaml::from_str(source)?)
  }

  pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(source)?)
  }

  /// Reads a configuration file. Files ending in `.json` are parsed as JSON,
  /// anything else as YAML.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let is_json = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    tracing::debug!(target: "quiz_ioc", path = %path.display(), is_json, "loading container configuration");

    if is_json {
      Self::from_json_str(&source)
    } else {
      Self::from_yaml_str(&source)
    }
  }
}
