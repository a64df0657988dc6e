//! Association from UI handles back to the wallets they were built from

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::debug;

use wallet_standard::{Result, Wallet, WalletStandardError};

use crate::types::{UiWallet, UiWalletAccount, UiWalletHandle};
use crate::weak_map::WeakKeyMap;

/// Maps UI handles to their underlying wallets
///
/// Handles are held weakly, and so are the wallets: a handle outliving its
/// wallet resolves to `WalletNotFound`.
#[derive(Default)]
pub struct HandleRegistry {
    wallets: Mutex<WeakKeyMap<UiWallet, Weak<dyn Wallet>>>,
    accounts: Mutex<WeakKeyMap<UiWalletAccount, Weak<dyn Wallet>>>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `handle` with `wallet`, replacing any earlier association
    pub fn register_wallet_handle<'a>(
        &self,
        handle: impl Into<UiWalletHandle<'a>>,
        wallet: &Arc<dyn Wallet>,
    ) {
        let target = Arc::downgrade(wallet);
        match handle.into() {
            UiWalletHandle::Wallet(ui_wallet) => {
                debug!("Registered handle for wallet '{}'", ui_wallet.name());
                self.wallets.lock().insert(ui_wallet, target);
            }
            UiWalletHandle::Account(ui_account) => {
                debug!("Registered handle for account {}", ui_account.address());
                self.accounts.lock().insert(ui_account, target);
            }
        }
    }

    /// The wallet behind `handle`
    pub fn get_wallet_for_handle<'a>(
        &self,
        handle: impl Into<UiWalletHandle<'a>>,
    ) -> Result<Arc<dyn Wallet>> {
        let target = match handle.into() {
            UiWalletHandle::Wallet(ui_wallet) => self.wallets.lock().get(ui_wallet).cloned(),
            UiWalletHandle::Account(ui_account) => self.accounts.lock().get(ui_account).cloned(),
        };
        target
            .and_then(|weak| weak.upgrade())
            .ok_or(WalletStandardError::WalletNotFound)
    }
}
