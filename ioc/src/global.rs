//! The global IoC container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;

// The application-wide container, created on first access.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the global container instance.
///
/// The application bootstrap registers its services here once and request
/// handling resolves them from anywhere.
///
/// # Examples
///
/// ```
/// use quiz_ioc::global;
///
/// global().singleton("app.name", String::from("Exam Review"));
///
/// let name = global().make_as::<String>("app.name").unwrap();
/// assert_eq!(*name, "Exam Review");
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
