//! App-side composition root
//!
//! An `AppContext` owns the single `Wallets` collection of one execution
//! context and wires it to the window: it listens for
//! `wallet-standard:register-wallet` first and dispatches
//! `wallet-standard:app-ready` second, which is the app's half of the
//! order-independent handshake.

use once_cell::sync::{Lazy, OnceCell};
use std::sync::Arc;
use tracing::{debug, error, info};

use wallet_standard::{
    guard, AppReadyEvent, WalletEventsWindow, WalletsRegisterApi, Window, WindowEvent,
    WindowEventType,
};

use crate::wallets::Wallets;

static GLOBAL_APP: Lazy<AppContext> = Lazy::new(|| {
    let window: Arc<dyn WalletEventsWindow> = Window::global();
    AppContext::new(Some(window))
});

/// Owns the app's `Wallets` and its connection to the window
pub struct AppContext {
    window: Option<Arc<dyn WalletEventsWindow>>,
    wallets: OnceCell<Wallets>,
    legacy_installed: OnceCell<()>,
}

impl AppContext {
    /// Create a context bound to `window`; `None` means no window exists and
    /// discovery is skipped
    pub fn new(window: Option<Arc<dyn WalletEventsWindow>>) -> Self {
        Self {
            window,
            wallets: OnceCell::new(),
            legacy_installed: OnceCell::new(),
        }
    }

    /// The process-wide context, bound to `Window::global()`
    pub fn global() -> &'static AppContext {
        &GLOBAL_APP
    }

    /// Get the app's wallets, connecting to the window on first call
    pub fn get_wallets(&self) -> Wallets {
        if let Some(wallets) = self.wallets.get() {
            return wallets.clone();
        }

        // stored before wiring: wallets that register during app-ready may
        // call back into this context
        let wallets = Wallets::new();
        if self.wallets.set(wallets.clone()).is_err() {
            return self.wallets.get().cloned().unwrap_or(wallets);
        }

        let Some(window) = &self.window else {
            debug!("No window; wallets will only be registered directly");
            return wallets;
        };

        let api = WalletsRegisterApi::new(Arc::new(wallets.clone()));

        let listener_api = api.clone();
        let listener = Arc::new(move |event: &WindowEvent| {
            if let Some(callback) = event.register_wallet_callback() {
                callback(&listener_api);
            }
        });
        if let Err(e) = window.add_event_listener(WindowEventType::RegisterWallet, listener) {
            error!("{} event listener could not be added: {}", WindowEventType::RegisterWallet, e);
        }

        if let Err(e) = window.dispatch_event(WindowEvent::AppReady(AppReadyEvent::new(api))) {
            error!("{} event could not be dispatched: {}", WindowEventType::AppReady, e);
        }

        info!("App ready with {} wallet(s)", wallets.len());
        wallets
    }

    /// Get the app's wallets and also accept wallets announced through the
    /// legacy `navigator.wallets` slot
    ///
    /// Pending callbacks are drained once; afterwards the slot invokes new
    /// callbacks immediately.
    #[deprecated(note = "use `get_wallets`; the navigator slot is kept for older wallets")]
    pub fn deprecated_get_wallets(&self) -> Wallets {
        let wallets = self.get_wallets();

        let Some(window) = &self.window else {
            return wallets;
        };
        if self.legacy_installed.set(()).is_err() {
            return wallets;
        }

        let slot = match window.navigator_wallets() {
            Ok(slot) => slot,
            Err(e) => {
                error!("navigator.wallets is not available: {}", e);
                return wallets;
            }
        };

        let api = WalletsRegisterApi::new(Arc::new(wallets.clone()));
        match slot.install(api.clone()) {
            Ok(pending) => {
                debug!("Draining {} navigator.wallets callback(s)", pending.len());
                for callback in pending {
                    guard("navigator.wallets callback", || callback(&api));
                }
            }
            Err(e) => error!("navigator.wallets could not be set: {}", e),
        }

        wallets
    }
}

/// The process-wide app's wallets
pub fn get_wallets() -> Wallets {
    AppContext::global().get_wallets()
}

/// The process-wide app's wallets, including legacy `navigator.wallets`
/// registrations
#[deprecated(note = "use `get_wallets`; the navigator slot is kept for older wallets")]
pub fn deprecated_get_wallets() -> Wallets {
    #[allow(deprecated)]
    AppContext::global().deprecated_get_wallets()
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use wallet_standard::{
        deprecated_register_wallet_on, register_wallet_on, InMemoryWallet, NavigatorWallets,
        Wallet, WalletIcon, WindowError, WindowEventListener,
    };

    use crate::wallets::WalletsEventName;

    fn test_wallet(name: &str) -> Arc<dyn Wallet> {
        let icon = WalletIcon::new("data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=").unwrap();
        Arc::new(InMemoryWallet::new(name, icon))
    }

    fn context() -> (Arc<Window>, AppContext) {
        let window = Arc::new(Window::new());
        let app = AppContext::new(Some(window.clone()));
        (window, app)
    }

    /// A window whose every operation fails
    struct HostileWindow;

    impl WalletEventsWindow for HostileWindow {
        fn add_event_listener(
            &self,
            event_type: WindowEventType,
            _listener: WindowEventListener,
        ) -> Result<(), WindowError> {
            Err(WindowError::ListenerRejected(event_type, "denied".to_string()))
        }

        fn dispatch_event(&self, event: WindowEvent) -> Result<(), WindowError> {
            Err(WindowError::DispatchFailed(event.event_type(), "denied".to_string()))
        }

        fn navigator_wallets(&self) -> Result<&NavigatorWallets, WindowError> {
            Err(WindowError::NavigatorUnavailable("denied".to_string()))
        }
    }

    #[test]
    fn test_get_wallets_is_a_singleton() {
        let (_window, app) = context();
        let first = app.get_wallets();
        let second = app.get_wallets();
        assert!(first.ptr_eq(&second));
    }

    #[test]
    fn test_app_first_then_wallet() {
        let (window, app) = context();
        let wallets = app.get_wallets();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        wallets.on(WalletsEventName::Register, move |_| *counter.lock() += 1);

        let wallet = test_wallet("Late");
        register_wallet_on(window.as_ref(), wallet.clone());

        assert_eq!(wallets.len(), 1);
        assert!(Arc::ptr_eq(&wallets.get()[0], &wallet));
        assert_eq!(*calls.lock(), 1);
    }

    #[test]
    fn test_wallet_first_then_app() {
        let (window, app) = context();
        let wallet = test_wallet("Early");
        register_wallet_on(window.as_ref(), wallet.clone());

        let wallets = app.get_wallets();

        assert_eq!(wallets.len(), 1);
        assert!(Arc::ptr_eq(&wallets.get()[0], &wallet));
    }

    #[test]
    fn test_mixed_order_registers_each_wallet_once() {
        let (window, app) = context();
        let early = test_wallet("Early");
        let late = test_wallet("Late");

        register_wallet_on(window.as_ref(), early.clone());
        let wallets = app.get_wallets();
        register_wallet_on(window.as_ref(), late.clone());
        register_wallet_on(window.as_ref(), early.clone());

        let registered = wallets.get();
        assert_eq!(registered.len(), 2);
        assert!(Arc::ptr_eq(&registered[0], &early));
        assert!(Arc::ptr_eq(&registered[1], &late));
    }

    #[test]
    fn test_two_apps_each_discover_wallet() {
        let window = Arc::new(Window::new());
        let wallet = test_wallet("Shared");
        register_wallet_on(window.as_ref(), wallet);

        let first = AppContext::new(Some(window.clone())).get_wallets();
        let second = AppContext::new(Some(window.clone())).get_wallets();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_no_window() {
        let app = AppContext::new(None);
        let wallets = app.get_wallets();
        assert!(wallets.is_empty());

        wallets.register(vec![test_wallet("Direct")]);
        assert_eq!(app.get_wallets().len(), 1);
    }

    #[test]
    fn test_hostile_window_is_tolerated() {
        let window: Arc<dyn WalletEventsWindow> = Arc::new(HostileWindow);
        let app = AppContext::new(Some(window.clone()));

        let wallets = app.deprecated_get_wallets();
        assert!(wallets.is_empty());

        register_wallet_on(window.as_ref(), test_wallet("Ignored"));
        deprecated_register_wallet_on(window.as_ref(), test_wallet("Ignored"));
        assert!(wallets.is_empty());
    }

    #[test]
    fn test_legacy_callbacks_are_drained() {
        let (window, app) = context();
        let slot_wallet = test_wallet("Legacy");
        let legacy = slot_wallet.clone();
        window
            .navigator_wallets()
            .unwrap()
            .push(Arc::new(move |api: &WalletsRegisterApi| {
                api.register(vec![legacy.clone()]);
            }));

        let wallets = app.deprecated_get_wallets();
        assert_eq!(wallets.len(), 1);
        assert!(window.navigator_wallets().unwrap().is_live());

        // pushes after installation register immediately
        let live = test_wallet("Live");
        let pushed = live.clone();
        window
            .navigator_wallets()
            .unwrap()
            .push(Arc::new(move |api: &WalletsRegisterApi| {
                api.register(vec![pushed.clone()]);
            }));
        assert_eq!(wallets.len(), 2);
        assert!(Arc::ptr_eq(&wallets.get()[1], &live));
    }

    #[test]
    fn test_legacy_and_modern_register_once() {
        let (window, app) = context();
        let wallet = test_wallet("Both");
        deprecated_register_wallet_on(window.as_ref(), wallet.clone());

        let calls = Arc::new(Mutex::new(0));
        let wallets = app.get_wallets();
        let counter = calls.clone();
        wallets.on(WalletsEventName::Register, move |_| *counter.lock() += 1);

        app.deprecated_get_wallets();

        assert_eq!(wallets.len(), 1);
        // app-ready registered it; draining the slot found it already present
        assert_eq!(*calls.lock(), 0);
    }

    #[test]
    fn test_legacy_install_happens_once() {
        let (window, app) = context();
        app.deprecated_get_wallets();
        app.deprecated_get_wallets();

        assert!(window.navigator_wallets().unwrap().is_live());
    }
}
