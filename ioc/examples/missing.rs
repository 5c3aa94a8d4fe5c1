use quiz_ioc::{global, resolve, ResolutionError};
use std::panic;

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(String, "UnregisteredService");
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `make()` method ---
  println!("\nNow, attempting to resolve using the fallible `make()` method...");

  match global().make("UnregisteredService") {
    Ok(_) => panic!("Should not have found the service!"),
    Err(ResolutionError::NotFound { id }) => println!("Correctly received NotFound for {}.", id),
    Err(other) => panic!("Unexpected error: {}", other),
  }
}
