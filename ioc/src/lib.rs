//! # Quiz IoC
//!
//! A thread-safe, string-keyed Inversion of Control (IoC) container with
//! constructor autowiring.
//!
//! Services are requested by identifier. The container answers from, in order:
//!
//! - **Singletons**: pre-built instances registered with `bind_singleton`.
//! - **Bindings**: a rule registered with `bind`, either a factory called with
//!   the container or another identifier to construct in its place.
//! - **Blueprints**: the constructor description of an [`Injectable`] type.
//!   Its parameters are resolved recursively (services) or filled from
//!   configuration and defaults (primitive values).
//!
//! Resolution never caches what it builds; every `make` of an unbound type
//! produces a fresh object graph. Dependency cycles fail with
//! [`ResolutionError::CircularDependency`].
//!
//! ## Quick Start
//!
//! ```
//! use quiz_ioc::{Arguments, Container, Injectable, Parameter, Result};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!   fn log(&self, message: &str) -> String;
//! }
//!
//! struct ConsoleLogger;
//!
//! impl Logger for ConsoleLogger {
//!   fn log(&self, message: &str) -> String {
//!     format!("[console] {}", message)
//!   }
//! }
//!
//! impl Injectable for ConsoleLogger {
//!   const ID: &'static str = "ConsoleLogger";
//!
//!   fn construct(_: &mut Arguments) -> Result<Self> {
//!     Ok(ConsoleLogger)
//!   }
//! }
//!
//! struct ExamController {
//!   logger: Arc<dyn Logger>,
//! }
//!
//! impl Injectable for ExamController {
//!   const ID: &'static str = "ExamController";
//!
//!   fn parameters() -> Vec<Parameter> {
//!     vec![Parameter::service_id("logger", "Logger")]
//!   }
//!
//!   fn construct(args: &mut Arguments) -> Result<Self> {
//!     Ok(ExamController { logger: args.service()? })
//!   }
//! }
//!
//! let container = Container::new();
//! container.register_interface("Logger");
//! container.register::<ConsoleLogger>();
//! container.register::<ExamController>();
//! container.bind_implementation::<dyn Logger, ConsoleLogger>("Logger", |logger| logger);
//!
//! let controller = container.resolve::<ExamController>().unwrap();
//! assert_eq!(controller.logger.log("ready"), "[console] ready");
//! ```

mod blueprint;
mod config;
mod container;
mod core;
mod error;
mod global;
mod instance;
mod macros;

pub use blueprint::{Arguments, Blueprint, Injectable, Parameter, ParameterKind};
pub use config::ContainerConfig;
pub use container::{Container, Rule};
pub use error::{ConfigError, ResolutionError, Result};
pub use global::global;
pub use instance::Instance;
