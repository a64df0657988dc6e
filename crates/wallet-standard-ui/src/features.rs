//! Feature lookup through UI handles

use std::sync::Arc;
use tracing::debug;

use wallet_standard::{Result, WalletFeature, WalletStandardError};

use crate::registry::UiRegistry;
use crate::types::{UiWalletAccount, UiWalletHandle};

impl UiRegistry {
    /// The wallet's implementation of `feature_name`, looked up on the
    /// wallet behind `handle` at call time
    pub fn get_wallet_feature<'a>(
        &self,
        handle: impl Into<UiWalletHandle<'a>>,
        feature_name: &str,
    ) -> Result<WalletFeature> {
        let wallet = self.get_wallet_for_handle(handle)?;
        let features = wallet.features();
        if let Some(feature) = features.get(feature_name) {
            return Ok(feature.clone());
        }

        let wallet_name = wallet.name();
        debug!("Wallet '{}' lacks feature {}", wallet_name, feature_name);
        Err(WalletStandardError::FeatureUnimplemented {
            feature_name: feature_name.to_string(),
            supported_chains: wallet.chains(),
            supported_features: features.into_keys().collect(),
            wallet_name,
        })
    }

    /// Like `get_wallet_feature`, but first requires the account itself to
    /// declare the feature
    pub fn get_wallet_account_feature(
        &self,
        ui_account: &Arc<UiWalletAccount>,
        feature_name: &str,
    ) -> Result<WalletFeature> {
        if !ui_account.features().iter().any(|f| f == feature_name) {
            return Err(WalletStandardError::AccountFeatureUnimplemented {
                address: ui_account.address().to_string(),
                feature_name: feature_name.to_string(),
                supported_chains: ui_account.chains().to_vec(),
                supported_features: ui_account.features().to_vec(),
            });
        }
        self.get_wallet_feature(ui_account, feature_name)
    }
}
