//! # wallet-standard-ui
//!
//! Stable handles for UI code:
//! - `UiWallet` / `UiWalletAccount`, immutable snapshots that are only
//!   replaced when something observable changes
//! - A handle registry mapping every snapshot back to its wallet
//! - Feature lookup and handle comparison through that registry
//!
//! The free functions use `UiRegistry::global()`.

mod compare;
mod features;
mod handles;
mod projection;
mod registry;
mod types;
mod weak_map;

use std::sync::Arc;

use wallet_standard::{Result, Wallet, WalletAccount, WalletFeature};

pub use compare::identifier_arrays_are_different;
pub use handles::HandleRegistry;
pub use registry::UiRegistry;
pub use types::{UiWallet, UiWalletAccount, UiWalletHandle};

/// See `UiRegistry::get_or_create_ui_wallet_for_standard_wallet`
pub fn get_or_create_ui_wallet_for_standard_wallet(wallet: &Arc<dyn Wallet>) -> Arc<UiWallet> {
    UiRegistry::global().get_or_create_ui_wallet_for_standard_wallet(wallet)
}

/// See `UiRegistry::get_or_create_ui_wallet_account_for_standard_wallet_account`
pub fn get_or_create_ui_wallet_account_for_standard_wallet_account(
    wallet: &Arc<dyn Wallet>,
    account: &Arc<WalletAccount>,
) -> Arc<UiWalletAccount> {
    UiRegistry::global().get_or_create_ui_wallet_account_for_standard_wallet_account(wallet, account)
}

pub fn register_wallet_handle<'a>(handle: impl Into<UiWalletHandle<'a>>, wallet: &Arc<dyn Wallet>) {
    UiRegistry::global().register_wallet_handle(handle, wallet)
}

pub fn get_wallet_for_handle<'a>(handle: impl Into<UiWalletHandle<'a>>) -> Result<Arc<dyn Wallet>> {
    UiRegistry::global().get_wallet_for_handle(handle)
}

pub fn get_wallet_account_for_ui_wallet_account(
    ui_account: &Arc<UiWalletAccount>,
) -> Result<Arc<WalletAccount>> {
    UiRegistry::global().get_wallet_account_for_ui_wallet_account(ui_account)
}

pub fn get_wallet_feature<'a>(
    handle: impl Into<UiWalletHandle<'a>>,
    feature_name: &str,
) -> Result<WalletFeature> {
    UiRegistry::global().get_wallet_feature(handle, feature_name)
}

pub fn get_wallet_account_feature(
    ui_account: &Arc<UiWalletAccount>,
    feature_name: &str,
) -> Result<WalletFeature> {
    UiRegistry::global().get_wallet_account_feature(ui_account, feature_name)
}

pub fn ui_wallet_accounts_are_same(a: &Arc<UiWalletAccount>, b: &Arc<UiWalletAccount>) -> bool {
    UiRegistry::global().ui_wallet_accounts_are_same(a, b)
}

pub fn ui_wallet_account_belongs_to_ui_wallet(
    account: &Arc<UiWalletAccount>,
    wallet: &Arc<UiWallet>,
) -> bool {
    UiRegistry::global().ui_wallet_account_belongs_to_ui_wallet(account, wallet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallet_standard::{InMemoryWallet, WalletIcon};

    #[test]
    fn test_global_functions_share_registry() {
        let icon = WalletIcon::new("data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=").unwrap();
        let wallet: Arc<dyn Wallet> = Arc::new(InMemoryWallet::new("Global", icon));

        let ui = get_or_create_ui_wallet_for_standard_wallet(&wallet);
        assert!(Arc::ptr_eq(&ui, &get_or_create_ui_wallet_for_standard_wallet(&wallet)));
        assert!(Arc::ptr_eq(&get_wallet_for_handle(&ui).unwrap(), &wallet));
    }
}
