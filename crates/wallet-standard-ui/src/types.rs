//! Immutable UI snapshots of wallets and accounts

use std::fmt;
use std::sync::Arc;

use wallet_standard::{IdentifierString, WalletAccount, WalletIcon};

/// Immutable snapshot of a wallet for UI code
///
/// Snapshots are only built by `UiRegistry`. A new snapshot is published
/// whenever any field group of the wallet changes; unchanged groups are
/// shared by reference with the previous snapshot, so `Arc::ptr_eq` on a
/// group tells whether it changed.
#[derive(Debug)]
pub struct UiWallet {
    pub(crate) accounts: Arc<[Arc<UiWalletAccount>]>,
    pub(crate) chains: Arc<[IdentifierString]>,
    pub(crate) features: Arc<[IdentifierString]>,
    pub(crate) icon: WalletIcon,
    pub(crate) name: String,
    pub(crate) version: String,
}

impl UiWallet {
    pub fn accounts(&self) -> &Arc<[Arc<UiWalletAccount>]> {
        &self.accounts
    }

    pub fn chains(&self) -> &Arc<[IdentifierString]> {
        &self.chains
    }

    /// Names of the wallet's features; the implementations stay behind
    /// `get_wallet_feature`
    pub fn features(&self) -> &Arc<[IdentifierString]> {
        &self.features
    }

    pub fn icon(&self) -> &WalletIcon {
        &self.icon
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Immutable snapshot of one account of one wallet
pub struct UiWalletAccount {
    address: String,
    public_key: Vec<u8>,
    chains: Arc<[IdentifierString]>,
    features: Arc<[IdentifierString]>,
    label: Option<String>,
    icon: Option<WalletIcon>,
}

impl UiWalletAccount {
    pub(crate) fn from_account(account: &WalletAccount) -> Self {
        Self {
            address: account.address().to_string(),
            public_key: account.public_key().to_vec(),
            chains: Arc::from(account.chains()),
            features: Arc::from(account.features()),
            label: account.label().map(str::to_string),
            icon: account.icon().cloned(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn chains(&self) -> &Arc<[IdentifierString]> {
        &self.chains
    }

    pub fn features(&self) -> &Arc<[IdentifierString]> {
        &self.features
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn icon(&self) -> Option<&WalletIcon> {
        self.icon.as_ref()
    }
}

impl fmt::Debug for UiWalletAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiWalletAccount")
            .field("address", &self.address)
            .field("public_key", &hex::encode(&self.public_key))
            .field("chains", &self.chains)
            .field("features", &self.features)
            .field("label", &self.label)
            .finish()
    }
}

/// Either kind of UI handle
#[derive(Debug, Clone, Copy)]
pub enum UiWalletHandle<'a> {
    Wallet(&'a Arc<UiWallet>),
    Account(&'a Arc<UiWalletAccount>),
}

impl<'a> From<&'a Arc<UiWallet>> for UiWalletHandle<'a> {
    fn from(wallet: &'a Arc<UiWallet>) -> Self {
        Self::Wallet(wallet)
    }
}

impl<'a> From<&'a Arc<UiWalletAccount>> for UiWalletHandle<'a> {
    fn from(account: &'a Arc<UiWalletAccount>) -> Self {
        Self::Account(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_snapshot_copies_fields() {
        let icon = WalletIcon::new("data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=").unwrap();
        let account = WalletAccount::new(
            "addr1",
            vec![0xab, 0xcd],
            vec![IdentifierString::new("solana:mainnet").unwrap()],
            vec![IdentifierString::new("solana:signMessage").unwrap()],
        )
        .with_label("Main")
        .with_icon(icon.clone());

        let ui = UiWalletAccount::from_account(&account);
        assert_eq!(ui.address(), "addr1");
        assert_eq!(ui.public_key(), &[0xab, 0xcd]);
        assert_eq!(ui.chains().len(), 1);
        assert_eq!(ui.features()[0], "solana:signMessage");
        assert_eq!(ui.label(), Some("Main"));
        assert_eq!(ui.icon(), Some(&icon));
        assert!(format!("{:?}", ui).contains("abcd"));
    }
}
