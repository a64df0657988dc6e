//! Wallet features: opaque capability objects and the standard feature contracts
//!
//! A feature is whatever object a wallet vendor exposes under a namespaced
//! name. The registry never looks inside one; it only hands out the same
//! object it was given. The `standard:*` contracts below describe the shape
//! apps can expect when they downcast.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::account::WalletAccount;
use crate::identifier::IdentifierString;

/// Error type returned by vendor-implemented feature methods
pub type FeatureError = Box<dyn std::error::Error + Send + Sync>;

/// An opaque, reference-counted capability object
#[derive(Clone)]
pub struct WalletFeature(Arc<dyn Any + Send + Sync>);

impl WalletFeature {
    /// Wrap a feature implementation
    pub fn new<T: Any + Send + Sync>(implementation: T) -> Self {
        Self(Arc::new(implementation))
    }

    /// Wrap an already shared feature implementation
    pub fn from_arc<T: Any + Send + Sync>(implementation: Arc<T>) -> Self {
        Self(implementation)
    }

    /// Borrow the implementation as a concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Recover a shared handle to the implementation as a concrete type
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.0.clone().downcast::<T>().ok()
    }

    /// Whether two features are the very same object
    pub fn ptr_eq(&self, other: &WalletFeature) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for WalletFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WalletFeature")
            .field(&Arc::as_ptr(&self.0))
            .finish()
    }
}

/// Name of the `standard:connect` feature
pub const STANDARD_CONNECT: &str = "standard:connect";
/// Name of the `standard:disconnect` feature
pub const STANDARD_DISCONNECT: &str = "standard:disconnect";
/// Name of the `standard:events` feature
pub const STANDARD_EVENTS: &str = "standard:events";
/// Version of the standard feature contracts
pub const STANDARD_FEATURE_VERSION: &str = "1.0.0";

/// Input for `standard:connect`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectInput {
    /// Only return accounts that are already authorized, without prompting
    pub silent: bool,
}

/// Output of `standard:connect`
#[derive(Debug, Clone, Default)]
pub struct ConnectOutput {
    pub accounts: Vec<Arc<WalletAccount>>,
}

type ConnectFn = dyn Fn(ConnectInput) -> Result<ConnectOutput, FeatureError> + Send + Sync;
type DisconnectFn = dyn Fn() -> Result<(), FeatureError> + Send + Sync;

/// `standard:connect` - obtain authorization to use the wallet's accounts
pub struct StandardConnectFeature {
    version: &'static str,
    connect: Box<ConnectFn>,
}

impl StandardConnectFeature {
    pub fn new<F>(connect: F) -> Self
    where
        F: Fn(ConnectInput) -> Result<ConnectOutput, FeatureError> + Send + Sync + 'static,
    {
        Self {
            version: STANDARD_FEATURE_VERSION,
            connect: Box::new(connect),
        }
    }

    pub fn version(&self) -> &str {
        self.version
    }

    pub fn connect(&self, input: ConnectInput) -> Result<ConnectOutput, FeatureError> {
        (self.connect)(input)
    }
}

/// `standard:disconnect` - release the wallet's authorization
pub struct StandardDisconnectFeature {
    version: &'static str,
    disconnect: Box<DisconnectFn>,
}

impl StandardDisconnectFeature {
    pub fn new<F>(disconnect: F) -> Self
    where
        F: Fn() -> Result<(), FeatureError> + Send + Sync + 'static,
    {
        Self {
            version: STANDARD_FEATURE_VERSION,
            disconnect: Box::new(disconnect),
        }
    }

    pub fn version(&self) -> &str {
        self.version
    }

    pub fn disconnect(&self) -> Result<(), FeatureError> {
        (self.disconnect)()
    }
}

/// Properties that changed, passed to `standard:events` `change` listeners
#[derive(Debug, Clone, Default)]
pub struct StandardEventsChangeProperties {
    pub chains: Option<Vec<IdentifierString>>,
    pub features: Option<Vec<IdentifierString>>,
    pub accounts: Option<Vec<Arc<WalletAccount>>>,
}

/// Listener for `standard:events` `change`
pub type StandardEventsListener = Arc<dyn Fn(&StandardEventsChangeProperties) + Send + Sync>;

/// Returned by `standard:events` `on`; call to stop listening
pub type StandardEventsOff = Box<dyn FnOnce() + Send>;

type OnFn = dyn Fn(StandardEventsListener) -> StandardEventsOff + Send + Sync;

/// `standard:events` - subscribe to changes of the wallet's properties
pub struct StandardEventsFeature {
    version: &'static str,
    on: Box<OnFn>,
}

impl StandardEventsFeature {
    pub fn new<F>(on: F) -> Self
    where
        F: Fn(StandardEventsListener) -> StandardEventsOff + Send + Sync + 'static,
    {
        Self {
            version: STANDARD_FEATURE_VERSION,
            on: Box::new(on),
        }
    }

    pub fn version(&self) -> &str {
        self.version
    }

    /// Subscribe to `change` events
    pub fn on_change(&self, listener: StandardEventsListener) -> StandardEventsOff {
        (self.on)(listener)
    }
}
