//! The `Wallet` contract and an in-memory implementation

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use crate::account::WalletAccount;
use crate::features::WalletFeature;
use crate::identifier::{IdentifierString, WalletIcon};

/// Version of the Wallet Standard API this crate implements
pub const WALLET_STANDARD_VERSION: &str = "1.0.0";

/// Features a wallet exposes, keyed by feature name, in declaration order
pub type WalletFeatures = IndexMap<IdentifierString, WalletFeature>;

/// A wallet provider, as seen by apps
///
/// Wallets are shared as `Arc<dyn Wallet>` and identified by that `Arc`.
/// Every getter returns the wallet's *current* state; a wallet may change its
/// accounts, chains or features at any time and the UI registry picks the
/// change up the next time the wallet is projected.
pub trait Wallet: Send + Sync {
    /// Wallet Standard version the wallet implements
    fn version(&self) -> String;

    /// Display name
    fn name(&self) -> String;

    /// Display icon
    fn icon(&self) -> WalletIcon;

    /// Chains the wallet supports
    fn chains(&self) -> Vec<IdentifierString>;

    /// Features the wallet implements
    fn features(&self) -> WalletFeatures;

    /// Accounts the app is authorized to use
    fn accounts(&self) -> Vec<Arc<WalletAccount>>;
}

impl fmt::Debug for dyn Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("name", &self.name())
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
struct WalletState {
    version: String,
    name: String,
    icon: WalletIcon,
    chains: Vec<IdentifierString>,
    features: WalletFeatures,
    accounts: Vec<Arc<WalletAccount>>,
}

/// A wallet whose state lives in memory and can be changed through setters
pub struct InMemoryWallet {
    state: RwLock<WalletState>,
}

impl InMemoryWallet {
    /// Create a wallet with no chains, features or accounts
    pub fn new(name: impl Into<String>, icon: WalletIcon) -> Self {
        Self {
            state: RwLock::new(WalletState {
                version: WALLET_STANDARD_VERSION.to_string(),
                name: name.into(),
                icon,
                chains: Vec::new(),
                features: WalletFeatures::new(),
                accounts: Vec::new(),
            }),
        }
    }

    pub fn with_chains(self, chains: Vec<IdentifierString>) -> Self {
        self.set_chains(chains);
        self
    }

    pub fn with_feature(self, name: IdentifierString, feature: WalletFeature) -> Self {
        self.insert_feature(name, feature);
        self
    }

    pub fn with_accounts(self, accounts: Vec<Arc<WalletAccount>>) -> Self {
        self.set_accounts(accounts);
        self
    }

    pub fn set_version(&self, version: impl Into<String>) {
        self.state.write().version = version.into();
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.state.write().name = name.into();
    }

    pub fn set_icon(&self, icon: WalletIcon) {
        self.state.write().icon = icon;
    }

    pub fn set_chains(&self, chains: Vec<IdentifierString>) {
        self.state.write().chains = chains;
    }

    pub fn set_accounts(&self, accounts: Vec<Arc<WalletAccount>>) {
        self.state.write().accounts = accounts;
    }

    /// Add or replace a feature
    pub fn insert_feature(&self, name: IdentifierString, feature: WalletFeature) {
        self.state.write().features.insert(name, feature);
    }

    /// Remove a feature, returning it if it was present
    pub fn remove_feature(&self, name: &IdentifierString) -> Option<WalletFeature> {
        self.state.write().features.shift_remove(name)
    }
}

impl Wallet for InMemoryWallet {
    fn version(&self) -> String {
        self.state.read().version.clone()
    }

    fn name(&self) -> String {
        self.state.read().name.clone()
    }

    fn icon(&self) -> WalletIcon {
        self.state.read().icon.clone()
    }

    fn chains(&self) -> Vec<IdentifierString> {
        self.state.read().chains.clone()
    }

    fn features(&self) -> WalletFeatures {
        self.state.read().features.clone()
    }

    fn accounts(&self) -> Vec<Arc<WalletAccount>> {
        self.state.read().accounts.clone()
    }
}

impl fmt::Debug for InMemoryWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("InMemoryWallet")
            .field("name", &state.name)
            .field("version", &state.version)
            .field("accounts", &state.accounts.len())
            .finish_non_exhaustive()
    }
}
