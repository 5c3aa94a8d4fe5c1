//! Wires the controllers and services of the exam-review site through the
//! global container, the way the application bootstrap does on startup.
//!
//! Run with `RUST_LOG=quiz_ioc=trace` to watch each resolution step.

use quiz_ioc::{global, resolve, Arguments, ContainerConfig, Injectable, Instance, Parameter, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

// --- Session ---

trait Session: Send + Sync {
  fn set(&self, key: &str, value: &str);
  fn get(&self, key: &str) -> Option<String>;
}

#[derive(Default)]
struct MemorySession {
  values: Mutex<HashMap<String, String>>,
}

impl Session for MemorySession {
  fn set(&self, key: &str, value: &str) {
    if let Ok(mut values) = self.values.lock() {
      values.insert(key.to_string(), value.to_string());
    }
  }

  fn get(&self, key: &str) -> Option<String> {
    self.values.lock().ok()?.get(key).cloned()
  }
}

// --- Models ---

struct Database {
  dsn: String,
}

impl Injectable for Database {
  const ID: &'static str = "Database";

  fn parameters() -> Vec<Parameter> {
    vec![Parameter::value_or("dsn", "sqlite::memory:")]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(Database { dsn: args.value()? })
  }
}

struct UserProgress {
  db: Arc<Database>,
}

impl Injectable for UserProgress {
  const ID: &'static str = "UserProgress";

  fn parameters() -> Vec<Parameter> {
    vec![Parameter::service::<Database>("db")]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(UserProgress { db: args.service()? })
  }
}

// --- Controllers ---

struct ExamController {
  progress: Arc<UserProgress>,
  session: Arc<dyn Session>,
  questions_per_page: u32,
}

impl Injectable for ExamController {
  const ID: &'static str = "ExamController";

  fn parameters() -> Vec<Parameter> {
    vec![
      Parameter::service::<UserProgress>("progress"),
      Parameter::service_id("session", "Session"),
      Parameter::value_or("questions_per_page", 10),
    ]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(ExamController {
      progress: args.service()?,
      session: args.service()?,
      questions_per_page: args.value()?,
    })
  }
}

impl ExamController {
  fn question(&self, exam_id: u32) -> String {
    self.session.set("last_exam", &exam_id.to_string());
    format!(
      "exam {} via {} ({} per page)",
      exam_id, self.progress.db.dsn, self.questions_per_page
    )
  }
}

const CONFIG: &str = r#"
parameters:
  Database.dsn: "sqlite://exam_review.db"
  ExamController.questions_per_page: 5
"#;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = match ContainerConfig::from_yaml_str(CONFIG) {
    Ok(config) => config,
    Err(e) => {
      eprintln!("invalid configuration: {}", e);
      return;
    }
  };

  // --- Registration ---
  let container = global();
  container.apply_config(&config);
  container.register::<Database>();
  container.register::<UserProgress>();
  container.register::<ExamController>();

  // One session store for the whole process.
  let session: Arc<dyn Session> = Arc::new(MemorySession::default());
  container.bind_singleton("Session", Instance::new(session));

  // --- Request handling ---
  let controller = resolve!(ExamController);
  println!("{}", controller.question(3));

  let session = resolve!(trait Session, "Session");
  println!("last exam in session: {:?}", session.get("last_exam"));
}
