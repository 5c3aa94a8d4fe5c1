use thiserror::Error;

/// Errors produced while resolving a service from a [`Container`](crate::Container).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
  #[error("Class {id} does not exist.")]
  NotFound { id: String },

  #[error("Class {id} is not instantiable.")]
  NotInstantiable { id: String },

  #[error("Cannot resolve dependency {parameter} of {id}")]
  UnresolvableParameter { id: String, parameter: String },

  #[error("Circular dependency detected: {}", .chain.join(" -> "))]
  CircularDependency { chain: Vec<String> },

  #[error("Service {id} is not of the requested type {expected}")]
  TypeMismatch { id: String, expected: &'static str },

  #[error("Invalid argument {parameter} for {id}: {reason}")]
  InvalidArgument {
    id: String,
    parameter: String,
    reason: String,
  },

  #[error("Factory for {id} failed: {reason}")]
  Factory { id: String, reason: String },
}

impl ResolutionError {
  /// Convenience for factories that need to report their own failures.
  pub fn factory(id: impl Into<String>, reason: impl ToString) -> Self {
    ResolutionError::Factory {
      id: id.into(),
      reason: reason.to_string(),
    }
  }
}

/// Errors raised while loading a [`ContainerConfig`](crate::ContainerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read configuration file: {0}")]
  Read(#[from] std::io::Error),

  #[error("Failed to parse YAML configuration: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("Failed to parse JSON configuration: {0}")]
  Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = ResolutionError> = std::result::Result<T, E>;
