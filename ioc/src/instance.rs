//! The type-erased handle the container stores and hands out.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A resolved service.
///
/// Wraps an `Arc<T>` behind `dyn Any` so that values of any type, including
/// trait objects such as `Arc<dyn Logger>`, can live in the same registry.
/// Cloning an `Instance` clones the inner `Arc`, so every clone points at the
/// same object.
#[derive(Clone)]
pub struct Instance {
  inner: Arc<dyn Any + Send + Sync>,
  type_name: &'static str,
}

impl Instance {
  /// Wraps a shared pointer.
  pub fn new<T: ?Sized + Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      inner: Arc::new(value),
      type_name: type_name::<T>(),
    }
  }

  /// Wraps an owned value in a fresh `Arc`.
  pub fn from_value<T: Any + Send + Sync>(value: T) -> Self {
    Self::new(Arc::new(value))
  }

  /// Returns the shared pointer if this instance holds an `Arc<T>`.
  pub fn downcast<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.inner.downcast_ref::<Arc<T>>().cloned()
  }

  /// Returns `true` if this instance holds an `Arc<T>`.
  pub fn is<T: ?Sized + Any + Send + Sync>(&self) -> bool {
    self.inner.is::<Arc<T>>()
  }

  /// Name of the type this instance was created from.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// Returns `true` if both handles were cloned from the same instance.
  /// To compare the underlying objects, downcast and use `Arc::ptr_eq`.
  pub fn ptr_eq(a: &Instance, b: &Instance) -> bool {
    Arc::ptr_eq(&a.inner, &b.inner)
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Instance({})", self.type_name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  trait Shape: Send + Sync {
    fn sides(&self) -> u32;
  }

  struct Square;
  impl Shape for Square {
    fn sides(&self) -> u32 {
      4
    }
  }

  #[test]
  fn downcasts_to_the_stored_type_only() {
    let instance = Instance::from_value(7_u32);
    assert_eq!(*instance.downcast::<u32>().unwrap(), 7);
    assert!(instance.downcast::<i64>().is_none());
    assert!(instance.is::<u32>());
  }

  #[test]
  fn holds_trait_objects() {
    let shape: Arc<dyn Shape> = Arc::new(Square);
    let instance = Instance::new(shape);
    assert_eq!(instance.downcast::<dyn Shape>().unwrap().sides(), 4);
    assert!(instance.downcast::<Square>().is_none());
  }

  #[test]
  fn clones_share_identity() {
    let value = Arc::new(String::from("shared"));
    let a = Instance::new(Arc::clone(&value));
    let b = a.clone();
    assert!(Instance::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a.downcast::<String>().unwrap(), &value));
    assert!(!Instance::ptr_eq(&a, &Instance::new(Arc::clone(&value))));
  }
}
