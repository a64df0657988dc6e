//! # wallet-standard-demo
//!
//! Simulates a page with an app and several wallets on an in-process
//! window, then reports what the app's UI ends up seeing.

pub mod logging;
pub mod report;
pub mod scenario;
pub mod simulate;

pub use logging::init_logging;
pub use report::{AccountReport, Report, WalletReport};
pub use scenario::{AccountSpec, Scenario, ScenarioError, StartupOrder, WalletSpec};
pub use simulate::run;
