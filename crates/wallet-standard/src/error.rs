//! Error types for Wallet Standard operations

use thiserror::Error;

use crate::identifier::IdentifierString;

/// Result type alias for Wallet Standard operations
pub type Result<T> = std::result::Result<T, WalletStandardError>;

/// Stable numeric error codes, grouped by domain
pub mod codes {
    /// No underlying wallet is associated with a UI handle
    pub const WALLET_NOT_FOUND: u32 = 3834000;
    /// The resolved wallet has no account with the handle's address
    pub const WALLET_ACCOUNT_NOT_FOUND: u32 = 3834001;
    /// An account does not declare the requested feature
    pub const WALLET_ACCOUNT_FEATURE_UNIMPLEMENTED: u32 = 6160001;
    /// A wallet does not implement the requested feature
    pub const WALLET_FEATURE_UNIMPLEMENTED: u32 = 6160002;
    /// A string is not a `namespace:reference` identifier
    pub const INVALID_IDENTIFIER: u32 = 8078000;
    /// A string is not a base64 image data URI
    pub const INVALID_ICON: u32 = 8078001;
}

/// Wallet Standard error kinds
///
/// Every variant is a deterministic, synchronous failure. Nothing in this
/// workspace retries them; callers decide how to present them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletStandardError {
    #[error("No underlying wallet could be found for this handle - it was not created by this registry or its wallet has been dropped")]
    WalletNotFound,

    #[error("No account with address {address} could be found in the '{wallet_name}' wallet")]
    WalletAccountNotFound {
        address: String,
        wallet_name: String,
    },

    #[error("The account with address {address} does not support the feature `{feature_name}`")]
    AccountFeatureUnimplemented {
        address: String,
        feature_name: String,
        supported_chains: Vec<IdentifierString>,
        supported_features: Vec<IdentifierString>,
    },

    #[error("The wallet '{wallet_name}' does not support the feature `{feature_name}`")]
    FeatureUnimplemented {
        feature_name: String,
        supported_chains: Vec<IdentifierString>,
        supported_features: Vec<IdentifierString>,
        wallet_name: String,
    },

    #[error("Invalid identifier (expected `namespace:reference`): {0}")]
    InvalidIdentifier(String),

    #[error("Invalid wallet icon (expected a base64 image data URI): {0}")]
    InvalidIcon(String),
}

impl WalletStandardError {
    /// Stable numeric code for this error kind
    pub fn code(&self) -> u32 {
        match self {
            Self::WalletNotFound => codes::WALLET_NOT_FOUND,
            Self::WalletAccountNotFound { .. } => codes::WALLET_ACCOUNT_NOT_FOUND,
            Self::AccountFeatureUnimplemented { .. } => codes::WALLET_ACCOUNT_FEATURE_UNIMPLEMENTED,
            Self::FeatureUnimplemented { .. } => codes::WALLET_FEATURE_UNIMPLEMENTED,
            Self::InvalidIdentifier(_) => codes::INVALID_IDENTIFIER,
            Self::InvalidIcon(_) => codes::INVALID_ICON,
        }
    }
}

/// Check whether an error is a Wallet Standard error with the given code
pub fn is_wallet_standard_error<E>(error: &E, code: u32) -> bool
where
    E: std::error::Error + 'static,
{
    (error as &(dyn std::error::Error + 'static))
        .downcast_ref::<WalletStandardError>()
        .map_or(false, |e| e.code() == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            WalletStandardError::WalletNotFound,
            WalletStandardError::WalletAccountNotFound {
                address: "abc".to_string(),
                wallet_name: "Test".to_string(),
            },
            WalletStandardError::FeatureUnimplemented {
                feature_name: "feature:b".to_string(),
                supported_chains: vec![],
                supported_features: vec![],
                wallet_name: "Test".to_string(),
            },
            WalletStandardError::AccountFeatureUnimplemented {
                address: "abc".to_string(),
                feature_name: "feature:b".to_string(),
                supported_chains: vec![],
                supported_features: vec![],
            },
            WalletStandardError::InvalidIdentifier("nope".to_string()),
            WalletStandardError::InvalidIcon("nope".to_string()),
        ];

        let mut seen: Vec<u32> = errors.iter().map(|e| e.code()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), errors.len());
    }

    #[test]
    fn test_is_wallet_standard_error() {
        let error = WalletStandardError::WalletNotFound;
        assert!(is_wallet_standard_error(&error, codes::WALLET_NOT_FOUND));
        assert!(!is_wallet_standard_error(&error, codes::WALLET_FEATURE_UNIMPLEMENTED));

        let io = std::io::Error::new(std::io::ErrorKind::Other, "io");
        assert!(!is_wallet_standard_error(&io, codes::WALLET_NOT_FOUND));
    }

    #[test]
    fn test_account_not_found_message() {
        let error = WalletStandardError::WalletAccountNotFound {
            address: "abc".to_string(),
            wallet_name: "Phantasm".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No account with address abc could be found in the 'Phantasm' wallet"
        );
    }
}
