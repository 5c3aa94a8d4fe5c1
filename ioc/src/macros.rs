//! Public macros for ergonomic service resolution.

/// Resolves a service from the global container, panicking on failure.
///
/// For a non-panicking version, call `global().make(...)`,
/// `global().make_as(...)` or `global().resolve()` directly.
///
/// # Panics
///
/// Panics with the [`ResolutionError`](crate::ResolutionError) message if the
/// service cannot be resolved.
///
/// # Examples
///
/// ```
/// use quiz_ioc::{global, resolve};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// global().singleton("motd", String::from("hello"));
/// global().singleton_arc::<dyn Greeter>("Greeter", Arc::new(EnglishGreeter));
///
/// assert_eq!(*resolve!(String, "motd"), "hello");
/// assert_eq!(resolve!(trait Greeter, "Greeter").greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  ($($args:tt)+) => {
    $crate::resolve_from!($crate::global(), $($args)+)
  };
}

/// Resolves a service from the given container, panicking on failure.
///
/// Accepts the same forms as [`resolve!`]:
///
/// - `resolve_from!(container, MyService)` for an `Injectable` type,
/// - `resolve_from!(container, MyService, "id")` for a concrete type bound under `id`,
/// - `resolve_from!(container, trait MyTrait, "id")` for a trait object bound under `id`.
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, trait $trait_ident:ident, $id:expr) => {
    $container
      .make_as::<dyn $trait_ident>($id)
      .unwrap_or_else(|e| {
        panic!(
          "Failed to resolve required trait service '{}' as {}: {}",
          $id,
          std::any::type_name::<dyn $trait_ident>(),
          e
        )
      })
  };

  ($container:expr, $type:ty, $id:expr) => {
    $container.make_as::<$type>($id).unwrap_or_else(|e| {
      panic!(
        "Failed to resolve required service '{}' as {}: {}",
        $id,
        std::any::type_name::<$type>(),
        e
      )
    })
  };

  ($container:expr, $type:ty) => {
    $container.resolve::<$type>().unwrap_or_else(|e| {
      panic!(
        "Failed to resolve required service {}: {}",
        std::any::type_name::<$type>(),
        e
      )
    })
  };
}
