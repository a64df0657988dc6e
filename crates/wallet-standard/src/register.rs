//! Wallet-side registration
//!
//! A wallet announces itself with [`register_wallet`]: it dispatches
//! `wallet-standard:register-wallet` and then listens for
//! `wallet-standard:app-ready`. An app does the mirror image (listen, then
//! dispatch). Dispatch reaches already-subscribed listeners synchronously, so
//! whichever side loads second completes the handshake, and the wallet is
//! registered exactly once either way.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

use crate::wallet::Wallet;
use crate::window::{
    RegisterWalletCallback, RegisterWalletEvent, WalletEventsWindow, Window, WindowEvent,
    WindowEventType,
};

/// Something wallets can be registered with, normally an app's `Wallets`
pub trait WalletRegistrar: Send + Sync {
    /// Register wallets, returning a handle that unregisters exactly them
    fn register(&self, wallets: Vec<Arc<dyn Wallet>>) -> Unregister;
}

/// The registration API handed to wallets in protocol events
#[derive(Clone)]
pub struct WalletsRegisterApi(Arc<dyn WalletRegistrar>);

impl WalletsRegisterApi {
    pub fn new(registrar: Arc<dyn WalletRegistrar>) -> Self {
        Self(registrar)
    }

    /// Register wallets with the app behind this API
    pub fn register(&self, wallets: Vec<Arc<dyn Wallet>>) -> Unregister {
        self.0.register(wallets)
    }
}

impl fmt::Debug for WalletsRegisterApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletsRegisterApi").finish_non_exhaustive()
    }
}

/// Undoes one `register` call
///
/// Only the value returned by the registering call can unregister its batch;
/// registering an already-registered wallet again yields a no-op handle.
pub struct Unregister(Option<Box<dyn FnOnce() + Send>>);

impl Unregister {
    pub fn new<F: FnOnce() + Send + 'static>(unregister: F) -> Self {
        Self(Some(Box::new(unregister)))
    }

    /// A handle that does nothing
    pub fn noop() -> Self {
        Self(None)
    }

    pub fn is_noop(&self) -> bool {
        self.0.is_none()
    }

    /// Unregister the batch
    pub fn unregister(mut self) {
        if let Some(unregister) = self.0.take() {
            unregister();
        }
    }
}

impl fmt::Debug for Unregister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unregister")
            .field("noop", &self.is_noop())
            .finish()
    }
}

/// Register a wallet with any app on the process-wide window
pub fn register_wallet(wallet: Arc<dyn Wallet>) {
    register_wallet_on(Window::global().as_ref(), wallet);
}

/// Register a wallet with any app listening on `window`
///
/// Window failures are logged; the wallet may still be discovered later
/// through whichever half of the handshake succeeded.
pub fn register_wallet_on(window: &dyn WalletEventsWindow, wallet: Arc<dyn Wallet>) {
    let name = wallet.name();
    let callback: RegisterWalletCallback = Arc::new(move |api: &WalletsRegisterApi| {
        // the returned handle is dropped; wallets stay registered for the page's lifetime
        api.register(vec![wallet.clone()]);
    });

    debug!("Dispatching {} for wallet {}", WindowEventType::RegisterWallet, name);
    if let Err(e) = window.dispatch_event(WindowEvent::RegisterWallet(RegisterWalletEvent::new(
        callback.clone(),
    ))) {
        error!("{} event could not be dispatched: {}", WindowEventType::RegisterWallet, e);
    }

    let listener = Arc::new(move |event: &WindowEvent| {
        if let Some(api) = event.app_ready_api() {
            callback(api);
        }
    });
    if let Err(e) = window.add_event_listener(WindowEventType::AppReady, listener) {
        error!("{} event listener could not be added: {}", WindowEventType::AppReady, e);
    }
}

/// Register a wallet through both the event protocol and the legacy
/// `navigator.wallets` slot on the process-wide window
#[deprecated(note = "use `register_wallet`; the navigator slot is kept for older apps")]
pub fn deprecated_register_wallet(wallet: Arc<dyn Wallet>) {
    #[allow(deprecated)]
    deprecated_register_wallet_on(Window::global().as_ref(), wallet);
}

/// Register a wallet through both protocols on `window`
#[deprecated(note = "use `register_wallet_on`; the navigator slot is kept for older apps")]
pub fn deprecated_register_wallet_on(window: &dyn WalletEventsWindow, wallet: Arc<dyn Wallet>) {
    register_wallet_on(window, wallet.clone());

    match window.navigator_wallets() {
        Ok(slot) => slot.push(Arc::new(move |api: &WalletsRegisterApi| {
            api.register(vec![wallet.clone()]);
        })),
        Err(e) => error!("navigator.wallets could not be pushed: {}", e),
    }
}
