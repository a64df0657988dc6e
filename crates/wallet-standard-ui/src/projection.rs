//! Building and caching UI snapshots
//!
//! A wallet's snapshot is rebuilt field group by field group: accounts,
//! features, chains, then the basic info (icon, name, version). A group that
//! did not change is carried over by reference from the previous snapshot.
//! If no group changed the previous snapshot itself is returned.

use std::sync::Arc;
use tracing::debug;

use wallet_standard::{IdentifierString, Wallet, WalletAccount};

use crate::compare::identifier_arrays_are_different;
use crate::registry::{AccountCache, UiRegistry};
use crate::types::{UiWallet, UiWalletAccount};

impl UiRegistry {
    /// The UI snapshot of `account` as an account of `wallet`
    ///
    /// Cached per `(wallet, account)` identity pair; the same account object
    /// shared by two wallets yields two distinct handles. A new projection
    /// is associated with `wallet` in the handle registry.
    pub fn get_or_create_ui_wallet_account_for_standard_wallet_account(
        &self,
        wallet: &Arc<dyn Wallet>,
        account: &Arc<WalletAccount>,
    ) -> Arc<UiWalletAccount> {
        let mut accounts = self.accounts.lock();
        let cache = accounts.get_or_insert_with(wallet, AccountCache::new);
        if let Some(existing) = cache.get(account) {
            return existing.clone();
        }

        let ui_account = Arc::new(UiWalletAccount::from_account(account));
        cache.insert(account, ui_account.clone());
        drop(accounts);

        self.handles.register_wallet_handle(&ui_account, wallet);
        ui_account
    }

    /// The current UI snapshot of `wallet`
    ///
    /// Returns the cached snapshot while nothing observable changed, and a
    /// new snapshot that shares every unchanged field group otherwise.
    /// Snapshots are never mutated after they are published.
    pub fn get_or_create_ui_wallet_for_standard_wallet(
        &self,
        wallet: &Arc<dyn Wallet>,
    ) -> Arc<UiWallet> {
        let previous = self.wallets.lock().get(wallet).cloned();

        // vendor getters run with no registry lock held
        let live_accounts = wallet.accounts();
        let live_features: Vec<IdentifierString> = wallet.features().into_keys().collect();
        let live_chains = wallet.chains();

        let mut changed = previous.is_none();
        let mut projection = AccountProjection::new(self, wallet, &live_accounts);

        let accounts_changed = match &previous {
            Some(prev) => projection.differs_from(prev.accounts()),
            None => true,
        };
        let accounts = match &previous {
            Some(prev) if !accounts_changed => prev.accounts().clone(),
            _ => {
                changed = true;
                Arc::from(projection.into_vec())
            }
        };

        let features = match &previous {
            Some(prev) if !identifier_arrays_are_different(prev.features(), &live_features) => {
                prev.features().clone()
            }
            _ => {
                changed = true;
                Arc::from(live_features)
            }
        };

        let chains = match &previous {
            Some(prev) if !identifier_arrays_are_different(prev.chains(), &live_chains) => {
                prev.chains().clone()
            }
            _ => {
                changed = true;
                Arc::from(live_chains)
            }
        };

        let (icon, name, version) = (wallet.icon(), wallet.name(), wallet.version());
        if let Some(prev) = &previous {
            if prev.icon != icon || prev.name != name || prev.version != version {
                changed = true;
            }
        }

        if let Some(prev) = previous {
            if !changed {
                debug!("UI wallet '{}' unchanged", prev.name);
                return prev;
            }
        }

        let ui_wallet = Arc::new(UiWallet {
            accounts,
            chains,
            features,
            icon,
            name,
            version,
        });
        self.wallets.lock().insert(wallet, ui_wallet.clone());
        self.handles.register_wallet_handle(&ui_wallet, wallet);

        debug!(
            "Published UI wallet '{}' with {} account(s)",
            ui_wallet.name,
            ui_wallet.accounts.len()
        );
        ui_wallet
    }
}

/// Lazily projects a wallet's live accounts, index by index
///
/// The membership check stops at the first miss, so accounts past it are
/// only projected if a new snapshot is actually built.
struct AccountProjection<'a> {
    registry: &'a UiRegistry,
    wallet: &'a Arc<dyn Wallet>,
    accounts: &'a [Arc<WalletAccount>],
    projected: Vec<Arc<UiWalletAccount>>,
}

impl<'a> AccountProjection<'a> {
    fn new(
        registry: &'a UiRegistry,
        wallet: &'a Arc<dyn Wallet>,
        accounts: &'a [Arc<WalletAccount>],
    ) -> Self {
        Self {
            registry,
            wallet,
            accounts,
            projected: Vec::with_capacity(accounts.len()),
        }
    }

    fn get(&mut self, index: usize) -> Option<&Arc<UiWalletAccount>> {
        while self.projected.len() <= index {
            let account = self.accounts.get(self.projected.len())?;
            let ui_account = self
                .registry
                .get_or_create_ui_wallet_account_for_standard_wallet_account(self.wallet, account);
            self.projected.push(ui_account);
        }
        self.projected.get(index)
    }

    /// Whether the cached accounts differ from the live ones
    ///
    /// Same length and every live projection present in `cached`. A pure
    /// reordering therefore does not count as a change.
    fn differs_from(&mut self, cached: &[Arc<UiWalletAccount>]) -> bool {
        if cached.len() != self.accounts.len() {
            return true;
        }
        for index in 0..self.accounts.len() {
            let present = match self.get(index) {
                Some(projected) => cached.iter().any(|c| Arc::ptr_eq(c, projected)),
                None => false,
            };
            if !present {
                return true;
            }
        }
        false
    }

    fn into_vec(mut self) -> Vec<Arc<UiWalletAccount>> {
        if let Some(last) = self.accounts.len().checked_sub(1) {
            self.get(last);
        }
        self.projected
    }
}
