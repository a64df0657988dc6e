//! Wallet account type

use std::fmt;

use crate::identifier::{IdentifierString, WalletIcon};

/// An account a wallet has authorized the app to use
///
/// Accounts are immutable once built. Wallets share them as
/// `Arc<WalletAccount>`, and the `Arc` identity is what the UI registry
/// caches against, so a wallet that wants to change an account must replace
/// it with a new `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletAccount {
    address: String,
    public_key: Vec<u8>,
    chains: Vec<IdentifierString>,
    features: Vec<IdentifierString>,
    label: Option<String>,
    icon: Option<WalletIcon>,
}

impl WalletAccount {
    /// Create a new account with no label or icon
    pub fn new(
        address: impl Into<String>,
        public_key: impl Into<Vec<u8>>,
        chains: Vec<IdentifierString>,
        features: Vec<IdentifierString>,
    ) -> Self {
        Self {
            address: address.into(),
            public_key: public_key.into(),
            chains,
            features,
            label: None,
            icon: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_icon(mut self, icon: WalletIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Address of the account, in the chain's native format
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Public key bytes of the account
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Chains the account supports
    pub fn chains(&self) -> &[IdentifierString] {
        &self.chains
    }

    /// Feature names the account supports
    pub fn features(&self) -> &[IdentifierString] {
        &self.features
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn icon(&self) -> Option<&WalletIcon> {
        self.icon.as_ref()
    }
}

impl fmt::Debug for WalletAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletAccount")
            .field("address", &self.address)
            .field("public_key", &hex::encode(&self.public_key))
            .field("chains", &self.chains)
            .field("features", &self.features)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
