//! The event target wallets and apps discover each other on
//!
//! A `WalletEventsWindow` is the shared global object of one execution
//! context. [`Window`] is the in-process implementation; other
//! implementations (a real browser window, a hostile test double) plug in
//! through the same trait.

mod events;
mod navigator;

pub use events::*;
pub use navigator::{LegacyRegisterCallback, NavigatorWallets};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::util::guard;

/// Failures of the window itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("Event listener for {0} could not be added: {1}")]
    ListenerRejected(WindowEventType, String),

    #[error("Event {0} could not be dispatched: {1}")]
    DispatchFailed(WindowEventType, String),

    #[error("navigator.wallets is unavailable: {0}")]
    NavigatorUnavailable(String),

    #[error("navigator.wallets has already been replaced by an app")]
    NavigatorWalletsLocked,
}

/// Global event target of an execution context
pub trait WalletEventsWindow: Send + Sync {
    /// Subscribe to events of one type
    fn add_event_listener(
        &self,
        event_type: WindowEventType,
        listener: WindowEventListener,
    ) -> Result<(), WindowError>;

    /// Deliver an event synchronously to every listener subscribed to its type
    fn dispatch_event(&self, event: WindowEvent) -> Result<(), WindowError>;

    /// The legacy `navigator.wallets` slot
    fn navigator_wallets(&self) -> Result<&NavigatorWallets, WindowError>;
}

static GLOBAL_WINDOW: Lazy<Arc<Window>> = Lazy::new(|| Arc::new(Window::new()));

/// In-process window: a synchronous publish/subscribe bus plus the
/// navigator slot
pub struct Window {
    listeners: Mutex<Vec<(WindowEventType, WindowEventListener)>>,
    navigator_wallets: NavigatorWallets,
}

impl Window {
    /// Create an isolated window
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            navigator_wallets: NavigatorWallets::new(),
        }
    }

    /// The process-wide window, created on first use
    pub fn global() -> Arc<Window> {
        GLOBAL_WINDOW.clone()
    }

    /// Number of listeners subscribed to an event type
    pub fn listener_count(&self, event_type: WindowEventType) -> usize {
        self.listeners
            .lock()
            .iter()
            .filter(|(t, _)| *t == event_type)
            .count()
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletEventsWindow for Window {
    fn add_event_listener(
        &self,
        event_type: WindowEventType,
        listener: WindowEventListener,
    ) -> Result<(), WindowError> {
        self.listeners.lock().push((event_type, listener));
        debug!("Added {} listener", event_type);
        Ok(())
    }

    fn dispatch_event(&self, event: WindowEvent) -> Result<(), WindowError> {
        let event_type = event.event_type();

        // listeners added while dispatching do not see this event
        let listeners: Vec<WindowEventListener> = self
            .listeners
            .lock()
            .iter()
            .filter(|(t, _)| *t == event_type)
            .map(|(_, l)| l.clone())
            .collect();

        debug!("Dispatching {} to {} listeners", event_type, listeners.len());
        for listener in listeners {
            guard(event_type.as_str(), || listener(&event));
        }

        Ok(())
    }

    fn navigator_wallets(&self) -> Result<&NavigatorWallets, WindowError> {
        Ok(&self.navigator_wallets)
    }
}
