//! Namespaced identifiers and icon data URIs

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, WalletStandardError};

/// A namespaced identifier of the form `namespace:reference`
///
/// Used for chain IDs (`solana:mainnet`) and feature names
/// (`standard:connect`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentifierString(String);

impl IdentifierString {
    /// Parse and validate an identifier
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        match value.split_once(':') {
            Some((namespace, _)) if !namespace.is_empty() => Ok(Self(value)),
            _ => Err(WalletStandardError::InvalidIdentifier(value)),
        }
    }

    /// The part before the first `:`
    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map(|(ns, _)| ns).unwrap_or_default()
    }

    /// The part after the first `:`
    pub fn reference(&self) -> &str {
        self.0.split_once(':').map(|(_, r)| r).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentifierString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IdentifierString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for IdentifierString {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for IdentifierString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for IdentifierString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl FromStr for IdentifierString {
    type Err = WalletStandardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for IdentifierString {
    type Error = WalletStandardError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for IdentifierString {
    type Error = WalletStandardError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl From<IdentifierString> for String {
    fn from(value: IdentifierString) -> Self {
        value.0
    }
}

/// Image types a wallet icon may use
const ICON_MIME_TYPES: [&str; 4] = ["image/svg+xml", "image/webp", "image/png", "image/gif"];

/// A wallet or account icon: `data:image/{svg+xml|webp|png|gif};base64,...`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletIcon(String);

impl WalletIcon {
    /// Parse and validate an icon data URI
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let Some((mime_type, payload)) = split_data_uri(&value) else {
            return Err(WalletStandardError::InvalidIcon(truncate(&value)));
        };
        if !ICON_MIME_TYPES.contains(&mime_type) {
            return Err(WalletStandardError::InvalidIcon(format!(
                "unsupported image type {}",
                mime_type
            )));
        }
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| WalletStandardError::InvalidIcon(e.to_string()))?;

        Ok(Self(value))
    }

    /// Build an icon from raw image bytes
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Result<Self> {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self::new(format!("data:{};base64,{}", mime_type, payload))
    }

    /// The image MIME type, e.g. `image/svg+xml`
    pub fn mime_type(&self) -> &str {
        split_data_uri(&self.0).map(|(m, _)| m).unwrap_or_default()
    }

    /// Decode the image payload
    pub fn decode(&self) -> Vec<u8> {
        split_data_uri(&self.0)
            .and_then(|(_, payload)| {
                base64::engine::general_purpose::STANDARD.decode(payload).ok()
            })
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn split_data_uri(value: &str) -> Option<(&str, &str)> {
    value
        .strip_prefix("data:")?
        .split_once(";base64,")
}

fn truncate(value: &str) -> String {
    value.chars().take(48).collect()
}

impl fmt::Display for WalletIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WalletIcon {
    type Err = WalletStandardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for WalletIcon {
    type Error = WalletStandardError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<WalletIcon> for String {
    fn from(value: WalletIcon) -> Self {
        value.0
    }
}
