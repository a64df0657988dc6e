//! Discovery protocol events
//!
//! Neither event can be stopped: the types expose no `prevent_default` or
//! `stop_propagation`, so no participant can hide a wallet or an app from
//! the others.

use std::fmt;
use std::sync::Arc;

use crate::register::WalletsRegisterApi;

/// Type string of the event a wallet dispatches to announce itself
pub const REGISTER_WALLET_EVENT: &str = "wallet-standard:register-wallet";
/// Type string of the event an app dispatches once it can accept wallets
pub const APP_READY_EVENT: &str = "wallet-standard:app-ready";

/// Discovery event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEventType {
    RegisterWallet,
    AppReady,
}

impl WindowEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegisterWallet => REGISTER_WALLET_EVENT,
            Self::AppReady => APP_READY_EVENT,
        }
    }
}

impl fmt::Display for WindowEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch options of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInit {
    pub bubbles: bool,
    pub cancelable: bool,
    pub composed: bool,
}

impl EventInit {
    /// Options shared by both discovery events
    pub const UNSTOPPABLE: EventInit = EventInit {
        bubbles: false,
        cancelable: false,
        composed: false,
    };
}

/// Callback carried by `wallet-standard:register-wallet`
pub type RegisterWalletCallback = Arc<dyn Fn(&WalletsRegisterApi) + Send + Sync>;

/// Event dispatched by a wallet; its detail is a callback the app invokes
/// with its registration API
#[derive(Clone)]
pub struct RegisterWalletEvent {
    detail: RegisterWalletCallback,
}

impl RegisterWalletEvent {
    pub fn new(callback: RegisterWalletCallback) -> Self {
        Self { detail: callback }
    }

    pub fn event_type(&self) -> WindowEventType {
        WindowEventType::RegisterWallet
    }

    pub fn init(&self) -> EventInit {
        EventInit::UNSTOPPABLE
    }

    pub fn detail(&self) -> &RegisterWalletCallback {
        &self.detail
    }
}

/// Event dispatched by an app; its detail is the app's registration API
#[derive(Clone)]
pub struct AppReadyEvent {
    detail: WalletsRegisterApi,
}

impl AppReadyEvent {
    pub fn new(api: WalletsRegisterApi) -> Self {
        Self { detail: api }
    }

    pub fn event_type(&self) -> WindowEventType {
        WindowEventType::AppReady
    }

    pub fn init(&self) -> EventInit {
        EventInit::UNSTOPPABLE
    }

    pub fn detail(&self) -> &WalletsRegisterApi {
        &self.detail
    }
}

/// Any event delivered on a `WalletEventsWindow`
#[derive(Clone)]
pub enum WindowEvent {
    RegisterWallet(RegisterWalletEvent),
    AppReady(AppReadyEvent),
}

impl WindowEvent {
    pub fn event_type(&self) -> WindowEventType {
        match self {
            Self::RegisterWallet(e) => e.event_type(),
            Self::AppReady(e) => e.event_type(),
        }
    }

    pub fn init(&self) -> EventInit {
        EventInit::UNSTOPPABLE
    }

    /// The wallet's callback, if this is a register-wallet event
    pub fn register_wallet_callback(&self) -> Option<&RegisterWalletCallback> {
        match self {
            Self::RegisterWallet(e) => Some(e.detail()),
            Self::AppReady(_) => None,
        }
    }

    /// The app's registration API, if this is an app-ready event
    pub fn app_ready_api(&self) -> Option<&WalletsRegisterApi> {
        match self {
            Self::AppReady(e) => Some(e.detail()),
            Self::RegisterWallet(_) => None,
        }
    }
}

impl fmt::Debug for WindowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowEvent")
            .field("type", &self.event_type().as_str())
            .field("init", &self.init())
            .finish()
    }
}

/// Listener attached to a `WalletEventsWindow`
pub type WindowEventListener = Arc<dyn Fn(&WindowEvent) + Send + Sync>;
