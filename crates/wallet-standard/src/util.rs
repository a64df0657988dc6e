//! Small helpers shared by wallets, apps and the UI registry

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::error;

/// Run a callback, catching and logging any panic it raises
///
/// Used for every listener and callback supplied by a third party, so one
/// misbehaving participant cannot stop the others. Returns `false` if the
/// callback panicked.
pub fn guard<F: FnOnce()>(context: &str, callback: F) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(callback)) {
        Ok(()) => true,
        Err(payload) => {
            error!("{} failed: {}", context, panic_message(payload.as_ref()));
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// Identity of a shared object: the address of its allocation
///
/// Two live `Arc`s have the same identity exactly when `Arc::ptr_eq` holds.
pub fn identity<T: ?Sized>(value: &Arc<T>) -> usize {
    Arc::as_ptr(value) as *const () as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_catches_panic() {
        assert!(guard("ok listener", || {}));
        assert!(!guard("bad listener", || panic!("boom")));
    }

    #[test]
    fn test_guard_runs_callback() {
        let mut ran = false;
        guard("listener", || ran = true);
        assert!(ran);
    }

    #[test]
    fn test_identity() {
        let a: Arc<str> = Arc::from("a");
        let b = a.clone();
        let c: Arc<str> = Arc::from("a");

        assert_eq!(identity(&a), identity(&b));
        assert_ne!(identity(&a), identity(&c));
    }
}
