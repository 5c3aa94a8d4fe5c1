//! Constructor descriptions used for reflective construction.
//!
//! Rust has no runtime reflection, so every constructible type describes its
//! constructor up front: an ordered parameter list plus a function that builds
//! the value from positional [`Arguments`]. The container walks the parameter
//! list, resolves each entry and hands the results to the constructor in the
//! same order.

use crate::error::{ResolutionError, Result};
use crate::instance::Instance;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A type the container can build on its own.
///
/// # Examples
///
/// ```
/// use quiz_ioc::{Arguments, Container, Injectable, Parameter, Result};
/// use std::sync::Arc;
///
/// struct Database {
///   dsn: String,
/// }
///
/// impl Injectable for Database {
///   const ID: &'static str = "Database";
///
///   fn parameters() -> Vec<Parameter> {
///     vec![Parameter::value_or("dsn", "sqlite::memory:")]
///   }
///
///   fn construct(args: &mut Arguments) -> Result<Self> {
///     Ok(Database { dsn: args.value()? })
///   }
/// }
///
/// struct UserRepository {
///   db: Arc<Database>,
/// }
///
/// impl Injectable for UserRepository {
///   const ID: &'static str = "UserRepository";
///
///   fn parameters() -> Vec<Parameter> {
///     vec![Parameter::service::<Database>("db")]
///   }
///
///   fn construct(args: &mut Arguments) -> Result<Self> {
///     Ok(UserRepository { db: args.service()? })
///   }
/// }
///
/// let container = Container::new();
/// container.register::<Database>();
/// container.register::<UserRepository>();
///
/// let users = container.resolve::<UserRepository>().unwrap();
/// assert_eq!(users.db.dsn, "sqlite::memory:");
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
  /// Identifier the type is registered and requested under.
  const ID: &'static str;

  /// Constructor parameters in declaration order.
  fn parameters() -> Vec<Parameter> {
    Vec::new()
  }

  /// Builds the value from arguments resolved for [`parameters`](Self::parameters).
  fn construct(args: &mut Arguments) -> Result<Self>;
}

/// How a single constructor parameter is satisfied.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterKind {
  /// A user-defined type, resolved recursively through the container.
  Service { id: String },
  /// A primitive value, taken from configuration or the declared default.
  Value { default: Option<Value> },
}

/// One declared constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
  name: String,
  kind: ParameterKind,
}

impl Parameter {
  /// A dependency on another injectable type.
  pub fn service<T: Injectable>(name: impl Into<String>) -> Self {
    Self::service_id(name, T::ID)
  }

  /// A dependency on an identifier, typically an interface.
  pub fn service_id(name: impl Into<String>, id: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      kind: ParameterKind::Service { id: id.into() },
    }
  }

  /// A primitive parameter without a default.
  pub fn value(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      kind: ParameterKind::Value { default: None },
    }
  }

  /// A primitive parameter with a default.
  pub fn value_or(name: impl Into<String>, default: impl Into<Value>) -> Self {
    Self {
      name: name.into(),
      kind: ParameterKind::Value {
        default: Some(default.into()),
      },
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> &ParameterKind {
    &self.kind
  }
}

#[derive(Debug)]
pub(crate) enum Argument {
  Service(Instance),
  Value(Value),
}

/// Positional constructor arguments, consumed in declaration order.
#[derive(Debug)]
pub struct Arguments {
  id: String,
  entries: std::vec::IntoIter<(String, Argument)>,
}

impl Arguments {
  pub(crate) fn new(id: &str, entries: Vec<(String, Argument)>) -> Self {
    Self {
      id: id.to_owned(),
      entries: entries.into_iter(),
    }
  }

  /// Identifier of the type being constructed.
  pub fn id(&self) -> &str {
    &self.id
  }

  /// Number of arguments not yet consumed.
  pub fn remaining(&self) -> usize {
    self.entries.len()
  }

  /// Takes the next argument as a resolved service instance.
  pub fn instance(&mut self) -> Result<Instance> {
    match self.next_entry()? {
      (_, Argument::Service(instance)) => Ok(instance),
      (name, Argument::Value(_)) => Err(self.invalid(name, "expected a service, found a value")),
    }
  }

  /// Takes the next argument as a service of type `T`.
  pub fn service<T: ?Sized + Any + Send + Sync>(&mut self) -> Result<Arc<T>> {
    match self.next_entry()? {
      (name, Argument::Service(instance)) => instance.downcast::<T>().ok_or_else(|| {
        self.invalid(
          name,
          format!(
            "expected {}, found {}",
            type_name::<T>(),
            instance.type_name()
          ),
        )
      }),
      (name, Argument::Value(_)) => Err(self.invalid(name, "expected a service, found a value")),
    }
  }

  /// Takes the next argument as a primitive value of type `V`.
  pub fn value<V: DeserializeOwned>(&mut self) -> Result<V> {
    match self.next_entry()? {
      (name, Argument::Value(value)) => {
        serde_json::from_value(value).map_err(|e| self.invalid(name, e))
      }
      (name, Argument::Service(_)) => Err(self.invalid(name, "expected a value, found a service")),
    }
  }

  fn next_entry(&mut self) -> Result<(String, Argument)> {
    self
      .entries
      .next()
      .ok_or_else(|| self.invalid(String::from("<missing>"), "no arguments left"))
  }

  fn invalid(&self, parameter: String, reason: impl ToString) -> ResolutionError {
    ResolutionError::InvalidArgument {
      id: self.id.clone(),
      parameter,
      reason: reason.to_string(),
    }
  }
}

pub(crate) type Constructor = Arc<dyn Fn(&mut Arguments) -> Result<Instance> + Send + Sync>;

#[derive(Clone)]
pub(crate) enum BlueprintKind {
  Concrete {
    parameters: Arc<[Parameter]>,
    constructor: Constructor,
  },
  Abstract,
}

/// Registry entry describing how, and whether, an identifier can be built.
#[derive(Clone)]
pub struct Blueprint {
  pub(crate) kind: BlueprintKind,
}

impl Blueprint {
  /// A concrete type built from `parameters` by `constructor`.
  pub fn new<T, F>(parameters: Vec<Parameter>, constructor: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&mut Arguments) -> Result<T> + Send + Sync + 'static,
  {
    Self::with_constructor(parameters, move |args| constructor(args).map(Instance::from_value))
  }

  /// Like [`new`](Self::new), but the constructor produces the instance
  /// itself, which lets it hand out trait objects or shared values.
  pub fn with_constructor<F>(parameters: Vec<Parameter>, constructor: F) -> Self
  where
    F: Fn(&mut Arguments) -> Result<Instance> + Send + Sync + 'static,
  {
    Self {
      kind: BlueprintKind::Concrete {
        parameters: parameters.into(),
        constructor: Arc::new(constructor),
      },
    }
  }

  /// The blueprint of an [`Injectable`] type.
  pub fn of<T: Injectable>() -> Self {
    Self::new(T::parameters(), T::construct)
  }

  /// An interface or abstract type: known, but never built directly.
  pub fn interface() -> Self {
    Self {
      kind: BlueprintKind::Abstract,
    }
  }

  pub fn is_instantiable(&self) -> bool {
    matches!(self.kind, BlueprintKind::Concrete { .. })
  }

  /// Declared parameters; empty for interfaces.
  pub fn parameters(&self) -> &[Parameter] {
    match &self.kind {
      BlueprintKind::Concrete { parameters, .. } => parameters,
      BlueprintKind::Abstract => &[],
    }
  }
}

impl fmt::Debug for Blueprint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      BlueprintKind::Concrete { parameters, .. } => f
        .debug_struct("Blueprint::Concrete")
        .field("parameters", parameters)
        .finish(),
      BlueprintKind::Abstract => f.write_str("Blueprint::Abstract"),
    }
  }
}
