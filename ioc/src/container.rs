//! The main `Container` struct and its associated methods.

use crate::blueprint::{Argument, Arguments, Blueprint, BlueprintKind, Injectable, ParameterKind};
use crate::config::ContainerConfig;
use crate::core::{next_container_id, ResolutionGuard};
use crate::error::{ResolutionError, Result};
use crate::instance::Instance;
use dashmap::DashMap;
use serde_json::Value;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

type Factory = Arc<dyn Fn(&Container) -> Result<Instance> + Send + Sync>;
type Cast = Arc<dyn Fn(&Instance) -> Option<Instance> + Send + Sync>;

/// How a bound identifier is resolved.
#[derive(Clone)]
pub enum Rule {
  /// Reflectively construct another identifier in its place.
  Concrete(String),
  /// Call a function with the container and return whatever it builds.
  Factory(Factory),
}

impl Rule {
  pub fn factory<F>(factory: F) -> Self
  where
    F: Fn(&Container) -> Result<Instance> + Send + Sync + 'static,
  {
    Rule::Factory(Arc::new(factory))
  }
}

impl From<&str> for Rule {
  fn from(concrete: &str) -> Self {
    Rule::Concrete(concrete.to_owned())
  }
}

impl From<String> for Rule {
  fn from(concrete: String) -> Self {
    Rule::Concrete(concrete)
  }
}

impl fmt::Debug for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Rule::Concrete(concrete) => f.debug_tuple("Concrete").field(concrete).finish(),
      Rule::Factory(_) => f.write_str("Factory(..)"),
    }
  }
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct CastKey {
  abstract_id: String,
  concrete_id: String,
}

/// The Inversion of Control (IoC) container.
///
/// Holds explicit bindings, singleton instances and the blueprints of every
/// type it knows how to construct. All registries are concurrent maps, so a
/// single container can be shared between threads and registered into at any
/// time, including from inside a factory that is currently being resolved.
pub struct Container {
  id: u64,
  bindings: DashMap<String, Rule>,
  singletons: DashMap<String, Instance>,
  blueprints: DashMap<String, Blueprint>,
  casts: DashMap<CastKey, Cast>,
  parameters: DashMap<String, Value>,
}

impl Default for Container {
  fn default() -> Self {
    Self {
      id: next_container_id(),
      bindings: DashMap::new(),
      singletons: DashMap::new(),
      blueprints: DashMap::new(),
      casts: DashMap::new(),
      parameters: DashMap::new(),
    }
  }
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a container pre-populated from configuration.
  pub fn with_config(config: &ContainerConfig) -> Self {
    let container = Self::new();
    container.apply_config(config);
    container
  }

  /// Adds the bindings and parameter values of `config`, overwriting any
  /// existing entries with the same keys.
  pub fn apply_config(&self, config: &ContainerConfig) {
    for (abstract_id, concrete_id) in &config.bindings {
      self.bind_concrete(abstract_id, concrete_id.as_str());
    }
    for (key, value) in &config.parameters {
      self.parameters.insert(key.clone(), value.clone());
    }
    tracing::debug!(
      target: "quiz_ioc",
      bindings = config.bindings.len(),
      parameters = config.parameters.len(),
      "applied container configuration"
    );
  }

  // --- Bindings ---

  /// Records how `abstract_id` should be resolved.
  ///
  /// Passing `None` binds the identifier to itself. A later call for the
  /// same identifier replaces the earlier rule.
  pub fn bind(&self, abstract_id: &str, rule: Option<Rule>) {
    let rule = rule.unwrap_or_else(|| Rule::Concrete(abstract_id.to_owned()));
    tracing::trace!(target: "quiz_ioc", abstract_id, ?rule, "bind");
    self.bindings.insert(abstract_id.to_owned(), rule);
  }

  /// Binds `abstract_id` to another identifier that is built in its place.
  pub fn bind_concrete(&self, abstract_id: &str, concrete_id: impl Into<String>) {
    self.bind(abstract_id, Some(Rule::Concrete(concrete_id.into())));
  }

  /// Binds `abstract_id` to a factory called with this container on every `make`.
  pub fn bind_factory<F>(&self, abstract_id: &str, factory: F)
  where
    F: Fn(&Container) -> Result<Instance> + Send + Sync + 'static,
  {
    self.bind(abstract_id, Some(Rule::factory(factory)));
  }

  /// Binds `abstract_id` to the injectable type `C` and records how to view a
  /// built `C` as the interface `I`.
  pub fn bind_implementation<I, C>(&self, abstract_id: &str, cast: fn(Arc<C>) -> Arc<I>)
  where
    I: ?Sized + Any + Send + Sync,
    C: Injectable,
  {
    self.implement(abstract_id, cast);
    self.bind_concrete(abstract_id, C::ID);
  }

  // --- Singletons ---

  /// Stores a pre-built instance. It is returned as-is by every later
  /// [`make`](Self::make) for `abstract_id`, ahead of any binding.
  pub fn bind_singleton(&self, abstract_id: &str, instance: Instance) {
    tracing::trace!(
      target: "quiz_ioc",
      abstract_id,
      type_name = instance.type_name(),
      "bind_singleton"
    );
    self.singletons.insert(abstract_id.to_owned(), instance);
  }

  pub fn singleton<T: Any + Send + Sync>(&self, abstract_id: &str, value: T) {
    self.bind_singleton(abstract_id, Instance::from_value(value));
  }

  pub fn singleton_arc<T: ?Sized + Any + Send + Sync>(&self, abstract_id: &str, value: Arc<T>) {
    self.bind_singleton(abstract_id, Instance::new(value));
  }

  // --- Type Registry ---

  /// Makes `T` constructible under `T::ID`.
  pub fn register<T: Injectable>(&self) {
    self.register_blueprint(T::ID, Blueprint::of::<T>());
  }

  pub fn register_blueprint(&self, id: &str, blueprint: Blueprint) {
    tracing::trace!(target: "quiz_ioc", id, ?blueprint, "register");
    self.blueprints.insert(id.to_owned(), blueprint);
  }

  /// Declares `id` as an interface: known to the container, never built.
  pub fn register_interface(&self, id: &str) {
    self.register_blueprint(id, Blueprint::interface());
  }

  /// Records how to turn a built `C` into an `Arc<I>` when it is resolved
  /// through a binding for `abstract_id`.
  pub fn implement<I, C>(&self, abstract_id: &str, cast: fn(Arc<C>) -> Arc<I>)
  where
    I: ?Sized + Any + Send + Sync,
    C: Injectable,
  {
    let key = CastKey {
      abstract_id: abstract_id.to_owned(),
      concrete_id: C::ID.to_owned(),
    };
    let cast: Cast = Arc::new(move |instance: &Instance| {
      instance
        .downcast::<C>()
        .map(|concrete| Instance::new(cast(concrete)))
    });
    self.casts.insert(key, cast);
  }

  /// Sets the value used for a primitive constructor parameter, keyed as
  /// `"<ConcreteId>.<parameter>"`. Takes priority over declared defaults.
  pub fn set_parameter(&self, concrete_id: &str, parameter: &str, value: impl Into<Value>) {
    self
      .parameters
      .insert(format!("{}.{}", concrete_id, parameter), value.into());
  }

  // --- Introspection ---

  pub fn has_binding(&self, abstract_id: &str) -> bool {
    self.bindings.contains_key(abstract_id)
  }

  pub fn has_singleton(&self, abstract_id: &str) -> bool {
    self.singletons.contains_key(abstract_id)
  }

  /// Returns `true` if `id` has a blueprint, instantiable or not.
  pub fn is_registered(&self, id: &str) -> bool {
    self.blueprints.contains_key(id)
  }

  // --- Resolution ---

  /// Resolves `abstract_id` to an instance.
  ///
  /// Singletons win over bindings; a factory binding is called with the
  /// container; a concrete binding, or no binding at all, falls through to
  /// construction from the registered blueprint, resolving its parameters
  /// recursively.
  pub fn make(&self, abstract_id: &str) -> Result<Instance> {
    // Map guards are cloned out and dropped before any user code runs so that
    // factories and constructors may register into this same container.
    if let Some(instance) = self.singletons.get(abstract_id).map(|e| e.value().clone()) {
      tracing::trace!(target: "quiz_ioc", abstract_id, "resolved singleton");
      return Ok(instance);
    }

    let _guard = ResolutionGuard::enter(self.id, abstract_id).map_err(|e| {
      tracing::debug!(target: "quiz_ioc", abstract_id, error = %e, "resolution failed");
      e
    })?;

    let rule = self.bindings.get(abstract_id).map(|e| e.value().clone());
    let result = match rule {
      Some(Rule::Factory(factory)) => {
        tracing::trace!(target: "quiz_ioc", abstract_id, "invoking factory");
        factory(self)
      }
      Some(Rule::Concrete(concrete_id)) if concrete_id != abstract_id => {
        // The redirected identifier joins the chain so cycles closing
        // through it are reported where they happen.
        let _concrete_guard = ResolutionGuard::enter(self.id, &concrete_id)?;
        self
          .build(&concrete_id)
          .map(|instance| self.cast(abstract_id, &concrete_id, instance))
      }
      Some(Rule::Concrete(_)) | None => self.build(abstract_id),
    };

    if let Err(e) = &result {
      tracing::debug!(target: "quiz_ioc", abstract_id, error = %e, "resolution failed");
    }
    result
  }

  /// Resolves `abstract_id` and downcasts it to `Arc<T>`.
  pub fn make_as<T: ?Sized + Any + Send + Sync>(&self, abstract_id: &str) -> Result<Arc<T>> {
    let instance = self.make(abstract_id)?;
    instance
      .downcast::<T>()
      .ok_or_else(|| ResolutionError::TypeMismatch {
        id: abstract_id.to_owned(),
        expected: type_name::<T>(),
      })
  }

  /// Resolves an injectable type by its own identifier.
  pub fn resolve<T: Injectable>(&self) -> Result<Arc<T>> {
    self.make_as::<T>(T::ID)
  }

  fn cast(&self, abstract_id: &str, concrete_id: &str, instance: Instance) -> Instance {
    if abstract_id == concrete_id {
      return instance;
    }
    let key = CastKey {
      abstract_id: abstract_id.to_owned(),
      concrete_id: concrete_id.to_owned(),
    };
    let cast = self.casts.get(&key).map(|e| e.value().clone());
    match cast.and_then(|cast| cast(&instance)) {
      Some(cast) => cast,
      None => instance,
    }
  }

  fn build(&self, concrete_id: &str) -> Result<Instance> {
    let blueprint = self
      .blueprints
      .get(concrete_id)
      .map(|e| e.value().clone())
      .ok_or_else(|| ResolutionError::NotFound {
        id: concrete_id.to_owned(),
      })?;

    let (parameters, constructor) = match blueprint.kind {
      BlueprintKind::Concrete {
        parameters,
        constructor,
      } => (parameters, constructor),
      BlueprintKind::Abstract => {
        return Err(ResolutionError::NotInstantiable {
          id: concrete_id.to_owned(),
        })
      }
    };

    tracing::trace!(
      target: "quiz_ioc",
      concrete_id,
      parameters = parameters.len(),
      "building"
    );

    let mut resolved = Vec::with_capacity(parameters.len());
    for parameter in parameters.iter() {
      let argument = match parameter.kind() {
        ParameterKind::Service { id } => Argument::Service(self.make(id)?),
        ParameterKind::Value { default } => {
          let key = format!("{}.{}", concrete_id, parameter.name());
          let configured = self.parameters.get(&key).map(|e| e.value().clone());
          match configured.or_else(|| default.clone()) {
            Some(value) => Argument::Value(value),
            None => {
              return Err(ResolutionError::UnresolvableParameter {
                id: concrete_id.to_owned(),
                parameter: parameter.name().to_owned(),
              })
            }
          }
        }
      };
      resolved.push((parameter.name().to_owned(), argument));
    }

    constructor(&mut Arguments::new(concrete_id, resolved))
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("bindings", &self.bindings.len())
      .field("singletons", &self.singletons.len())
      .field("blueprints", &self.blueprints.len())
      .finish()
  }
}
