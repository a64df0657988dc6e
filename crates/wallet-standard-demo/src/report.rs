//! What the app ends up seeing, as printable report structs

use serde::Serialize;
use std::fmt;

use wallet_standard_ui::{UiWallet, UiWalletAccount};

use crate::scenario::StartupOrder;

/// Outcome of one simulated page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub order: StartupOrder,
    /// Window events in dispatch order
    pub events: Vec<String>,
    pub wallets: Vec<WalletReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletReport {
    pub name: String,
    pub version: String,
    pub icon_type: String,
    pub chains: Vec<String>,
    pub features: Vec<String>,
    pub accounts: Vec<AccountReport>,
    /// Accounts returned by `standard:connect`, if the wallet has it
    pub connected_accounts: Option<usize>,
    /// Whether a second projection returned the cached snapshot
    pub snapshot_reused: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReport {
    pub address: String,
    pub public_key: String,
    pub label: Option<String>,
    pub chains: Vec<String>,
    pub features: Vec<String>,
}

impl WalletReport {
    pub fn from_ui_wallet(wallet: &UiWallet) -> Self {
        Self {
            name: wallet.name().to_string(),
            version: wallet.version().to_string(),
            icon_type: wallet.icon().mime_type().to_string(),
            chains: wallet.chains().iter().map(|c| c.to_string()).collect(),
            features: wallet.features().iter().map(|f| f.to_string()).collect(),
            accounts: wallet
                .accounts()
                .iter()
                .map(|a| AccountReport::from_ui_account(a))
                .collect(),
            connected_accounts: None,
            snapshot_reused: false,
        }
    }
}

impl AccountReport {
    pub fn from_ui_account(account: &UiWalletAccount) -> Self {
        Self {
            address: account.address().to_string(),
            public_key: hex::encode(account.public_key()),
            label: account.label().map(str::to_string),
            chains: account.chains().iter().map(|c| c.to_string()).collect(),
            features: account.features().iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Startup order: {:?}", self.order)?;
        writeln!(f, "Window events:")?;
        for event in &self.events {
            writeln!(f, "  {}", event)?;
        }
        writeln!(f, "Wallets ({}):", self.wallets.len())?;
        for wallet in &self.wallets {
            write!(f, "{}", wallet)?;
        }
        Ok(())
    }
}

impl fmt::Display for WalletReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {} v{} ({})", self.name, self.version, self.icon_type)?;
        writeln!(f, "    chains:   {}", self.chains.join(", "))?;
        writeln!(f, "    features: {}", self.features.join(", "))?;
        if let Some(connected) = self.connected_accounts {
            writeln!(f, "    connect:  {} account(s)", connected)?;
        }
        writeln!(f, "    cached:   {}", self.snapshot_reused)?;
        for account in &self.accounts {
            writeln!(
                f,
                "    - {} [{}] {}",
                account.address,
                account.label.as_deref().unwrap_or("-"),
                account.public_key
            )?;
        }
        Ok(())
    }
}
