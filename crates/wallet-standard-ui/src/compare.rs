//! Change detection and handle comparison

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use wallet_standard::identity;

use crate::registry::UiRegistry;
use crate::types::{UiWallet, UiWalletAccount};

/// Whether two identifier lists hold different sets of values
///
/// Order and duplicates are ignored, so `[a, a, b]` and `[b, a]` are the
/// same. Only suitable as a change detector.
pub fn identifier_arrays_are_different<T: Eq + Hash>(a: &[T], b: &[T]) -> bool {
    let a: HashSet<&T> = a.iter().collect();
    let b: HashSet<&T> = b.iter().collect();
    a.len() != b.len() || a.iter().any(|value| !b.contains(value))
}

impl UiRegistry {
    /// Whether two account handles stand for the same account of the same
    /// wallet
    ///
    /// False when either handle cannot be resolved.
    pub fn ui_wallet_accounts_are_same(
        &self,
        a: &Arc<UiWalletAccount>,
        b: &Arc<UiWalletAccount>,
    ) -> bool {
        if Arc::ptr_eq(a, b) {
            return true;
        }
        if a.address() != b.address() {
            return false;
        }
        match (self.get_wallet_for_handle(a), self.get_wallet_for_handle(b)) {
            (Ok(first), Ok(second)) => identity(&first) == identity(&second),
            _ => false,
        }
    }

    /// Whether `account` belongs to the wallet behind `wallet`
    pub fn ui_wallet_account_belongs_to_ui_wallet(
        &self,
        account: &Arc<UiWalletAccount>,
        wallet: &Arc<UiWallet>,
    ) -> bool {
        match (
            self.get_wallet_for_handle(account),
            self.get_wallet_for_handle(wallet),
        ) {
            (Ok(first), Ok(second)) => identity(&first) == identity(&second),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallet_standard::{IdentifierString, InMemoryWallet, Wallet, WalletAccount, WalletIcon};

    #[test]
    fn test_identifier_arrays() {
        assert!(!identifier_arrays_are_different(&["a", "b"], &["b", "a"]));
        assert!(identifier_arrays_are_different(&["a"], &["a", "b"]));
        assert!(!identifier_arrays_are_different(&["a", "a", "b"], &["b", "a"]));
        assert!(!identifier_arrays_are_different::<&str>(&[], &[]));
        assert!(identifier_arrays_are_different(&["a"], &["b"]));
    }

    #[test]
    fn test_namespaced_identifier_cases() {
        assert!(!identifier_arrays_are_different(&["a:1", "a:2"], &["a:2", "a:1"]));
        assert!(!identifier_arrays_are_different(&["a:1"], &["a:1", "a:1"]));
        assert!(identifier_arrays_are_different(&["a:1"], &["a:2"]));
    }

    #[test]
    fn test_identifier_strings() {
        let mainnet = IdentifierString::new("solana:mainnet").unwrap();
        let devnet = IdentifierString::new("solana:devnet").unwrap();
        assert!(!identifier_arrays_are_different(
            &[mainnet.clone(), devnet.clone()],
            &[devnet.clone(), mainnet.clone()]
        ));
        assert!(identifier_arrays_are_different(&[mainnet], &[devnet]));
    }

    fn wallet_with(name: &str, accounts: Vec<Arc<WalletAccount>>) -> Arc<dyn Wallet> {
        let icon = WalletIcon::new("data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=").unwrap();
        Arc::new(InMemoryWallet::new(name, icon).with_accounts(accounts))
    }

    fn account(address: &str) -> Arc<WalletAccount> {
        Arc::new(WalletAccount::new(address, vec![0u8; 32], vec![], vec![]))
    }

    #[test]
    fn test_accounts_are_same() {
        let registry = UiRegistry::new();
        let one = wallet_with("One", vec![account("a")]);
        let two = wallet_with("Two", vec![account("a")]);

        let from_one = registry.get_or_create_ui_wallet_for_standard_wallet(&one).accounts()[0].clone();
        let from_two = registry.get_or_create_ui_wallet_for_standard_wallet(&two).accounts()[0].clone();
        assert!(registry.ui_wallet_accounts_are_same(&from_one, &from_one));
        assert!(!registry.ui_wallet_accounts_are_same(&from_one, &from_two));

        // a fresh account object with the same address in the same wallet
        let replacement = account("a");
        let again = registry
            .get_or_create_ui_wallet_account_for_standard_wallet_account(&one, &replacement);
        assert!(!Arc::ptr_eq(&from_one, &again));
        assert!(registry.ui_wallet_accounts_are_same(&from_one, &again));
    }

    #[test]
    fn test_unresolvable_accounts_are_not_same() {
        let registry = UiRegistry::new();
        let other = UiRegistry::new();
        let wallet = wallet_with("W", vec![account("a")]);

        let known = registry.get_or_create_ui_wallet_for_standard_wallet(&wallet).accounts()[0].clone();
        let foreign = other.get_or_create_ui_wallet_for_standard_wallet(&wallet).accounts()[0].clone();
        assert!(!registry.ui_wallet_accounts_are_same(&known, &foreign));
    }

    #[test]
    fn test_account_belongs_to_wallet() {
        let registry = UiRegistry::new();
        let one = wallet_with("One", vec![account("a")]);
        let two = wallet_with("Two", vec![account("b")]);

        let ui_one = registry.get_or_create_ui_wallet_for_standard_wallet(&one);
        let ui_two = registry.get_or_create_ui_wallet_for_standard_wallet(&two);
        let account_one = ui_one.accounts()[0].clone();

        assert!(registry.ui_wallet_account_belongs_to_ui_wallet(&account_one, &ui_one));
        assert!(!registry.ui_wallet_account_belongs_to_ui_wallet(&account_one, &ui_two));
    }
}
