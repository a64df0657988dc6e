//! UI registry composition root

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use wallet_standard::{Result, Wallet, WalletAccount, WalletStandardError};

use crate::handles::HandleRegistry;
use crate::types::{UiWallet, UiWalletAccount, UiWalletHandle};
use crate::weak_map::WeakKeyMap;

static GLOBAL_REGISTRY: Lazy<UiRegistry> = Lazy::new(UiRegistry::new);

/// Per-wallet cache of account projections, keyed by account identity
pub(crate) type AccountCache = WeakKeyMap<WalletAccount, Arc<UiWalletAccount>>;

/// Owns the UI wallet cache, the account projections and the handle
/// associations of one execution context
///
/// Handles built by one registry are unknown to every other registry.
#[derive(Default)]
pub struct UiRegistry {
    pub(crate) handles: HandleRegistry,
    pub(crate) wallets: Mutex<WeakKeyMap<dyn Wallet, Arc<UiWallet>>>,
    pub(crate) accounts: Mutex<WeakKeyMap<dyn Wallet, AccountCache>>,
}

impl UiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> &'static UiRegistry {
        &GLOBAL_REGISTRY
    }

    /// The handle associations of this registry
    pub fn handles(&self) -> &HandleRegistry {
        &self.handles
    }

    /// Associate `handle` with `wallet`, replacing any earlier association
    pub fn register_wallet_handle<'a>(
        &self,
        handle: impl Into<UiWalletHandle<'a>>,
        wallet: &Arc<dyn Wallet>,
    ) {
        self.handles.register_wallet_handle(handle, wallet)
    }

    /// The wallet behind `handle`
    pub fn get_wallet_for_handle<'a>(
        &self,
        handle: impl Into<UiWalletHandle<'a>>,
    ) -> Result<Arc<dyn Wallet>> {
        self.handles.get_wallet_for_handle(handle)
    }

    /// The wallet's current account with the handle's address
    ///
    /// The lookup runs against the wallet's accounts at call time, so an
    /// account the wallet has since removed is reported as not found.
    pub fn get_wallet_account_for_ui_wallet_account(
        &self,
        ui_account: &Arc<UiWalletAccount>,
    ) -> Result<Arc<WalletAccount>> {
        let wallet = self.get_wallet_for_handle(ui_account)?;
        let found = wallet
            .accounts()
            .into_iter()
            .find(|account| account.address() == ui_account.address());

        found.ok_or_else(|| {
            let wallet_name = wallet.name();
            debug!(
                "Account {} no longer in wallet '{}'",
                ui_account.address(),
                wallet_name
            );
            WalletStandardError::WalletAccountNotFound {
                address: ui_account.address().to_string(),
                wallet_name,
            }
        })
    }

    /// Number of wallets with a live cached snapshot
    pub fn cached_wallets(&self) -> usize {
        self.wallets.lock().len()
    }
}
