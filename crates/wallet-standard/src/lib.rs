//! # wallet-standard
//!
//! Shared contracts of the Wallet Standard:
//! - `Wallet` / `WalletAccount` and namespaced identifiers
//! - Opaque feature objects and the `standard:*` feature contracts
//! - The discovery event protocol and the legacy `navigator.wallets` slot
//! - Error kinds with stable numeric codes

pub mod account;
pub mod error;
pub mod features;
pub mod identifier;
pub mod register;
pub mod util;
pub mod wallet;
pub mod window;

pub use account::WalletAccount;
pub use error::{codes, is_wallet_standard_error, Result, WalletStandardError};
pub use features::{
    ConnectInput, ConnectOutput, FeatureError, StandardConnectFeature,
    StandardDisconnectFeature, StandardEventsChangeProperties, StandardEventsFeature,
    WalletFeature, STANDARD_CONNECT, STANDARD_DISCONNECT, STANDARD_EVENTS,
};
pub use identifier::{IdentifierString, WalletIcon};
#[allow(deprecated)]
pub use register::{
    deprecated_register_wallet, deprecated_register_wallet_on, register_wallet,
    register_wallet_on, Unregister, WalletRegistrar, WalletsRegisterApi,
};
pub use util::{guard, identity};
pub use wallet::{InMemoryWallet, Wallet, WalletFeatures, WALLET_STANDARD_VERSION};
pub use window::{
    AppReadyEvent, NavigatorWallets, RegisterWalletEvent, WalletEventsWindow, Window,
    WindowError, WindowEvent, WindowEventListener, WindowEventType, APP_READY_EVENT,
    REGISTER_WALLET_EVENT,
};
