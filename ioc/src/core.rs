//! Core, non-public data structures for the IoC container.

use crate::error::ResolutionError;
use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_container_id() -> u64 {
  NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed)
}

thread_local! {
  // Identifiers currently being resolved on this thread, in request order,
  // tagged with the owning container so that separate containers never see
  // each other's chains.
  static RESOLVING_STACK: RefCell<Vec<(u64, String)>> = const { RefCell::new(Vec::new()) };
}

/// An RAII guard to detect circular dependencies.
///
/// Entering pushes the identifier onto the thread-local resolution chain and
/// fails if it is already present for the same container. Dropping the guard
/// pops it again, including when resolution unwinds with an error.
pub(crate) struct ResolutionGuard {
  container: u64,
}

impl ResolutionGuard {
  pub(crate) fn enter(container: u64, id: &str) -> Result<Self, ResolutionError> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      let chain: Vec<&str> = stack
        .iter()
        .filter(|(owner, _)| *owner == container)
        .map(|(_, resolving)| resolving.as_str())
        .collect();

      if let Some(start) = chain.iter().position(|resolving| *resolving == id) {
        let mut cycle: Vec<String> = chain[start..].iter().map(|s| s.to_string()).collect();
        cycle.push(id.to_owned());
        return Err(ResolutionError::CircularDependency { chain: cycle });
      }

      stack.push((container, id.to_owned()));
      Ok(Self { container })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      // Guards drop in LIFO order per thread, so the last entry for this
      // container is always ours.
      if let Some(pos) = stack.iter().rposition(|(owner, _)| *owner == self.container) {
        stack.remove(pos);
      }
    });
  }
}
