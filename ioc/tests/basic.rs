use quiz_ioc::{Arguments, Container, Injectable, Instance, Parameter, ResolutionError, Result, Rule};
use std::sync::Arc;

// --- Test Fixtures ---

#[derive(Debug)]
struct Logger {
  prefix: String,
}

impl Injectable for Logger {
  const ID: &'static str = "Logger";

  fn construct(_: &mut Arguments) -> Result<Self> {
    Ok(Logger {
      prefix: "[log]".to_string(),
    })
  }
}

// Depends on `Logger`, which has a zero-argument constructor.
struct ExamService {
  logger: Arc<Logger>,
}

impl Injectable for ExamService {
  const ID: &'static str = "ExamService";

  fn parameters() -> Vec<Parameter> {
    vec![Parameter::service::<Logger>("logger")]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(ExamService {
      logger: args.service()?,
    })
  }
}

// A primitive parameter with a default value.
#[derive(Debug)]
struct Paginator {
  per_page: u32,
}

impl Injectable for Paginator {
  const ID: &'static str = "Paginator";

  fn parameters() -> Vec<Parameter> {
    vec![Parameter::value_or("per_page", 15)]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(Paginator {
      per_page: args.value()?,
    })
  }
}

// A primitive parameter without a default.
struct Database {
  _dsn: String,
}

impl Injectable for Database {
  const ID: &'static str = "Database";

  fn parameters() -> Vec<Parameter> {
    vec![Parameter::value("dsn")]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(Database { _dsn: args.value()? })
  }
}

fn container() -> Container {
  let container = Container::new();
  container.register::<Logger>();
  container.register::<ExamService>();
  container.register::<Paginator>();
  container.register::<Database>();
  container
}

// --- Basic Tests ---

#[test]
fn test_logger_scenario() {
  let container = container();

  // Nothing bound: reflective construction.
  let built = container.make_as::<Logger>("Logger").unwrap();
  assert_eq!(built.prefix, "[log]");

  // Registered singleton: returned exactly.
  let instance = Arc::new(Logger {
    prefix: "[singleton]".to_string(),
  });
  container.singleton_arc("Logger", Arc::clone(&instance));

  let resolved = container.make_as::<Logger>("Logger").unwrap();
  assert!(Arc::ptr_eq(&resolved, &instance));
  assert!(!Arc::ptr_eq(&resolved, &built));
}

#[test]
fn test_singleton_takes_priority_over_binding() {
  let container = container();
  container.bind_factory("Logger", |_| panic!("binding must not be used"));
  container.singleton(
    "Logger",
    Logger {
      prefix: "[fixed]".to_string(),
    },
  );

  let first = container.make("Logger").unwrap();
  let second = container.make("Logger").unwrap();

  assert!(Instance::ptr_eq(&first, &second));
  assert_eq!(first.downcast::<Logger>().unwrap().prefix, "[fixed]");
}

#[test]
fn test_self_binding_matches_unregistered_behavior() {
  let unbound = container();
  let self_bound = container();
  self_bound.bind("ExamService", None);
  assert!(self_bound.has_binding("ExamService"));

  let a = unbound.make_as::<ExamService>("ExamService").unwrap();
  let b = self_bound.make_as::<ExamService>("ExamService").unwrap();
  assert_eq!(a.logger.prefix, b.logger.prefix);

  // Same failure for identifiers nobody knows about.
  self_bound.bind("Ghost", None);
  assert_eq!(
    unbound.make("Ghost").unwrap_err(),
    self_bound.make("Ghost").unwrap_err()
  );
}

#[test]
fn test_rebinding_overwrites() {
  let container = container();
  container.bind("Pager", Some(Rule::from("Logger")));
  container.bind("Pager", Some(Rule::from("Paginator")));

  let pager = container.make("Pager").unwrap();
  assert!(pager.is::<Paginator>());
  assert!(!pager.is::<Logger>());
}

#[test]
fn test_recursive_autowiring_builds_fresh_dependencies() {
  let container = container();

  let first = container.resolve::<ExamService>().unwrap();
  let second = container.resolve::<ExamService>().unwrap();

  assert_eq!(first.logger.prefix, "[log]");
  assert!(!Arc::ptr_eq(&first.logger, &second.logger));
}

#[test]
fn test_default_value_fallback() {
  let container = container();
  assert_eq!(container.resolve::<Paginator>().unwrap().per_page, 15);
}

#[test]
fn test_unresolvable_parameter_names_the_parameter() {
  let container = container();

  let err = container.make("Database").unwrap_err();
  assert_eq!(
    err,
    ResolutionError::UnresolvableParameter {
      id: "Database".to_string(),
      parameter: "dsn".to_string(),
    }
  );
  assert!(err.to_string().contains("dsn"));
}

#[test]
fn test_missing_class() {
  let container = container();

  let err = container.make("DoesNotExist").unwrap_err();
  assert_eq!(
    err,
    ResolutionError::NotFound {
      id: "DoesNotExist".to_string(),
    }
  );
  assert_eq!(err.to_string(), "Class DoesNotExist does not exist.");
}

#[test]
fn test_interface_without_binding_is_not_instantiable() {
  let container = container();
  container.register_interface("SessionStore");
  assert!(container.is_registered("SessionStore"));

  let err = container.make("SessionStore").unwrap_err();
  assert_eq!(
    err,
    ResolutionError::NotInstantiable {
      id: "SessionStore".to_string(),
    }
  );
  assert!(err.to_string().contains("not instantiable"));
}

#[test]
fn test_unbound_resolution_is_transient() {
  let container = container();

  let a = container.make("Logger").unwrap();
  let b = container.make("Logger").unwrap();

  assert!(!Instance::ptr_eq(&a, &b));
  assert!(!Arc::ptr_eq(
    &a.downcast::<Logger>().unwrap(),
    &b.downcast::<Logger>().unwrap()
  ));
  assert!(!container.has_singleton("Logger"));
}

#[test]
fn test_typed_access_reports_mismatch() {
  let container = container();

  let err = container.make_as::<Paginator>("Logger").unwrap_err();
  assert!(matches!(err, ResolutionError::TypeMismatch { ref id, .. } if id == "Logger"));
}
