//! # wallet-standard-app
//!
//! App side of Wallet Standard discovery:
//! - `Wallets`, the live set of registered wallets with register/unregister events
//! - `AppContext`, which connects a `Wallets` to the window exactly once

mod app;
mod wallets;

#[allow(deprecated)]
pub use app::{deprecated_get_wallets, get_wallets, AppContext};
pub use wallets::{Unsubscribe, Wallets, WalletsEventName, WalletsListener};
