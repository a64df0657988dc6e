//! Scenario files describing the wallets of a simulated page
//!
//! Scenarios are plain JSON. Anything omitted falls back to the built-in
//! default scenario's values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use wallet_standard::{
    ConnectOutput, IdentifierString, InMemoryWallet, StandardConnectFeature,
    StandardDisconnectFeature, StandardEventsFeature, Wallet, WalletAccount, WalletFeature,
    WalletIcon, WalletStandardError, STANDARD_CONNECT, STANDARD_DISCONNECT, STANDARD_EVENTS,
};

/// Errors loading or building a scenario
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scenario file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Account {address} has an invalid public key: {source}")]
    InvalidPublicKey {
        address: String,
        source: hex::FromHexError,
    },

    #[error(transparent)]
    Wallet(#[from] WalletStandardError),
}

pub type Result<T> = std::result::Result<T, ScenarioError>;

/// Order in which the app and the wallets start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StartupOrder {
    /// The app calls `get_wallets` before any wallet registers
    #[default]
    AppFirst,
    /// Every wallet registers before the app calls `get_wallets`
    WalletsFirst,
    /// Wallets register around the app, half before and half after
    Interleaved,
}

/// One account of a scenario wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSpec {
    pub address: String,
    /// Hex-encoded public key
    pub public_key: String,
    #[serde(default)]
    pub chains: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// One scenario wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSpec {
    pub name: String,
    /// Icon data URI; a placeholder SVG when omitted
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub chains: Vec<String>,
    /// Feature names; `standard:*` names get working implementations
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub accounts: Vec<AccountSpec>,
    /// Also announce through the legacy `navigator.wallets` slot
    #[serde(default)]
    pub legacy: bool,
}

/// A simulated page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Scenario file version
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub order: StartupOrder,
    /// Whether the app also drains the legacy `navigator.wallets` slot
    #[serde(default)]
    pub legacy_app: bool,
    pub wallets: Vec<WalletSpec>,
}

fn default_version() -> u32 {
    1
}

const PLACEHOLDER_ICON: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciLz4=";

impl Default for Scenario {
    fn default() -> Self {
        let account = |address: &str, key: &str, label: &str| AccountSpec {
            address: address.to_string(),
            public_key: key.to_string(),
            chains: vec!["solana:mainnet".to_string()],
            features: vec![STANDARD_CONNECT.to_string(), "solana:signMessage".to_string()],
            label: Some(label.to_string()),
        };

        Self {
            version: 1,
            order: StartupOrder::default(),
            legacy_app: false,
            wallets: vec![
                WalletSpec {
                    name: "Solflare".to_string(),
                    icon: None,
                    chains: vec!["solana:mainnet".to_string(), "solana:devnet".to_string()],
                    features: vec![
                        STANDARD_CONNECT.to_string(),
                        STANDARD_DISCONNECT.to_string(),
                        STANDARD_EVENTS.to_string(),
                        "solana:signMessage".to_string(),
                    ],
                    accounts: vec![
                        account("7sKrc9", "0a1b2c3d", "Main"),
                        account("9xQeWv", "4e5f6a7b", "Savings"),
                    ],
                    legacy: false,
                },
                WalletSpec {
                    name: "Backpack".to_string(),
                    icon: None,
                    chains: vec!["solana:mainnet".to_string()],
                    features: vec![STANDARD_CONNECT.to_string(), STANDARD_EVENTS.to_string()],
                    accounts: vec![],
                    legacy: true,
                },
            ],
        }
    }
}

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&contents)?;
        debug!("Loaded scenario with {} wallet(s) from {:?}", scenario.wallets.len(), path);
        Ok(scenario)
    }

    /// Load from `path` if given, otherwise use the built-in scenario
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("No scenario file given, using built-in scenario");
                Ok(Self::default())
            }
        }
    }

    /// Build in-memory wallets for every wallet in the scenario
    pub fn build_wallets(&self) -> Result<Vec<Arc<InMemoryWallet>>> {
        self.wallets.iter().map(WalletSpec::build).collect()
    }
}

impl WalletSpec {
    pub fn build(&self) -> Result<Arc<InMemoryWallet>> {
        let icon = WalletIcon::new(self.icon.as_deref().unwrap_or(PLACEHOLDER_ICON))?;
        let accounts = self
            .accounts
            .iter()
            .map(|spec| spec.build().map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        let wallet = Arc::new(
            InMemoryWallet::new(&self.name, icon)
                .with_chains(identifiers(&self.chains)?)
                .with_accounts(accounts),
        );
        for name in &self.features {
            let name = IdentifierString::new(name.as_str())?;
            let feature = standard_feature(&wallet, name.as_str());
            wallet.insert_feature(name, feature);
        }
        Ok(wallet)
    }
}

impl AccountSpec {
    pub fn build(&self) -> Result<WalletAccount> {
        let public_key =
            hex::decode(&self.public_key).map_err(|source| ScenarioError::InvalidPublicKey {
                address: self.address.clone(),
                source,
            })?;
        let account = WalletAccount::new(
            &self.address,
            public_key,
            identifiers(&self.chains)?,
            identifiers(&self.features)?,
        );
        Ok(match &self.label {
            Some(label) => account.with_label(label),
            None => account,
        })
    }
}

fn identifiers(values: &[String]) -> Result<Vec<IdentifierString>> {
    values
        .iter()
        .map(|value| IdentifierString::new(value.as_str()).map_err(ScenarioError::from))
        .collect()
}

/// Marker implementation for features the demo only advertises
#[derive(Debug)]
pub struct AdvertisedFeature {
    pub name: String,
}

/// A working implementation for `standard:*` features, a marker otherwise
///
/// `standard:connect` reports the wallet's accounts at call time. The
/// closure holds the wallet weakly so the wallet can still be dropped.
fn standard_feature(wallet: &Arc<InMemoryWallet>, name: &str) -> WalletFeature {
    match name {
        STANDARD_CONNECT => {
            let weak = Arc::downgrade(wallet);
            WalletFeature::new(StandardConnectFeature::new(move |_input| {
                let accounts = weak.upgrade().map(|w| w.accounts()).unwrap_or_default();
                Ok(ConnectOutput { accounts })
            }))
        }
        STANDARD_DISCONNECT => WalletFeature::new(StandardDisconnectFeature::new(|| Ok(()))),
        STANDARD_EVENTS => WalletFeature::new(StandardEventsFeature::new(|_listener| Box::new(|| {}))),
        other => WalletFeature::new(AdvertisedFeature {
            name: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wallet_standard::ConnectInput;

    #[test]
    fn test_default_scenario_builds() {
        let wallets = Scenario::default().build_wallets().unwrap();
        assert_eq!(wallets.len(), 2);
        assert_eq!(wallets[0].name(), "Solflare");
        assert_eq!(wallets[0].accounts().len(), 2);
        assert_eq!(wallets[0].accounts()[0].public_key(), &[0x0a, 0x1b, 0x2c, 0x3d]);
        assert_eq!(wallets[0].features().len(), 4);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "order": "wallets-first",
                "legacyApp": true,
                "wallets": [
                    {{
                        "name": "Test",
                        "chains": ["solana:devnet"],
                        "features": ["standard:connect"],
                        "accounts": [{{ "address": "abc", "publicKey": "ff00" }}]
                    }}
                ]
            }}"#
        )
        .unwrap();

        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.version, 1);
        assert_eq!(scenario.order, StartupOrder::WalletsFirst);
        assert!(scenario.legacy_app);
        assert!(!scenario.wallets[0].legacy);

        let wallets = scenario.build_wallets().unwrap();
        assert_eq!(wallets[0].accounts()[0].public_key(), &[0xff, 0x00]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Scenario::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ScenarioError::Io(_)));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            Scenario::load(file.path()).unwrap_err(),
            ScenarioError::Json(_)
        ));
    }

    #[test]
    fn test_invalid_public_key() {
        let mut scenario = Scenario::default();
        scenario.wallets[0].accounts[0].public_key = "zz".to_string();
        assert!(matches!(
            scenario.build_wallets().unwrap_err(),
            ScenarioError::InvalidPublicKey { .. }
        ));
    }

    #[test]
    fn test_invalid_chain() {
        let mut scenario = Scenario::default();
        scenario.wallets[1].chains = vec!["mainnet".to_string()];
        assert!(matches!(
            scenario.build_wallets().unwrap_err(),
            ScenarioError::Wallet(WalletStandardError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_connect_reports_live_accounts() {
        let wallets = Scenario::default().build_wallets().unwrap();
        let features = wallets[0].features();
        let connect = features
            .get(STANDARD_CONNECT)
            .and_then(|f| f.downcast_ref::<StandardConnectFeature>())
            .unwrap();

        let output = connect.connect(ConnectInput::default()).unwrap();
        assert_eq!(output.accounts.len(), 2);

        let advertised = features.get("solana:signMessage").unwrap();
        assert_eq!(
            advertised.downcast_ref::<AdvertisedFeature>().unwrap().name,
            "solana:signMessage"
        );
    }
}
