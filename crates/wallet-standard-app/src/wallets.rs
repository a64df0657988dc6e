//! The app's live collection of registered wallets

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, info};

use wallet_standard::{guard, identity, Unregister, Wallet, WalletRegistrar};

/// Events emitted by `Wallets`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletsEventName {
    /// Wallets were added
    Register,
    /// Wallets were removed
    Unregister,
}

impl WalletsEventName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Unregister => "unregister",
        }
    }
}

/// Listener for `Wallets` events, invoked with the wallets just added or
/// removed
pub type WalletsListener = Arc<dyn Fn(&[Arc<dyn Wallet>]) + Send + Sync>;

#[derive(Default)]
struct Registered {
    /// Keyed by wallet identity, in registration order
    wallets: IndexMap<usize, Arc<dyn Wallet>>,
    /// Snapshot returned by `get`, dropped on every change
    snapshot: Option<Arc<[Arc<dyn Wallet>]>>,
}

struct ListenerEntry {
    id: u64,
    event: WalletsEventName,
    listener: WalletsListener,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<ListenerEntry>,
}

#[derive(Default)]
struct WalletsState {
    registered: Mutex<Registered>,
    listeners: Mutex<Listeners>,
}

/// Registered wallets of one app
///
/// Cloning is cheap and every clone shares the same set. Locks are never
/// held while listeners run, so listeners may call back into `Wallets`.
#[derive(Clone, Default)]
pub struct Wallets {
    state: Arc<WalletsState>,
}

impl Wallets {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered wallets in registration order
    ///
    /// The same snapshot is returned until the set changes.
    pub fn get(&self) -> Arc<[Arc<dyn Wallet>]> {
        let mut registered = self.state.registered.lock();
        if let Some(snapshot) = &registered.snapshot {
            return snapshot.clone();
        }

        let snapshot: Arc<[Arc<dyn Wallet>]> = registered.wallets.values().cloned().collect();
        registered.snapshot = Some(snapshot.clone());
        snapshot
    }

    /// Subscribe to `register` or `unregister` events
    pub fn on<F>(&self, event: WalletsEventName, listener: F) -> Unsubscribe
    where
        F: Fn(&[Arc<dyn Wallet>]) + Send + Sync + 'static,
    {
        let mut listeners = self.state.listeners.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push(ListenerEntry {
            id,
            event,
            listener: Arc::new(listener),
        });

        debug!("Added {} listener {}", event.as_str(), id);
        Unsubscribe {
            state: Arc::downgrade(&self.state),
            id,
        }
    }

    /// Register wallets not already registered
    ///
    /// Wallets already in the set (by identity) are dropped from the batch.
    /// If nothing is left the returned handle is a no-op; otherwise it
    /// unregisters exactly this batch.
    pub fn register(&self, wallets: Vec<Arc<dyn Wallet>>) -> Unregister {
        let requested = wallets.len();
        let batch: Vec<Arc<dyn Wallet>> = {
            let mut registered = self.state.registered.lock();
            let mut batch = Vec::with_capacity(requested);
            for wallet in wallets {
                let id = identity(&wallet);
                if registered.wallets.contains_key(&id) {
                    continue;
                }
                registered.wallets.insert(id, wallet.clone());
                batch.push(wallet);
            }
            if !batch.is_empty() {
                registered.snapshot = None;
            }
            batch
        };

        if batch.len() < requested {
            debug!("Skipped {} already registered wallet(s)", requested - batch.len());
        }
        if batch.is_empty() {
            return Unregister::noop();
        }

        info!("Registered {} wallet(s): {}", batch.len(), names(&batch));
        self.emit(WalletsEventName::Register, &batch);

        let wallets = self.clone();
        Unregister::new(move || wallets.unregister(batch))
    }

    /// Number of registered wallets
    pub fn len(&self) -> usize {
        self.state.registered.lock().wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two handles share the same collection
    pub fn ptr_eq(&self, other: &Wallets) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    fn unregister(&self, batch: Vec<Arc<dyn Wallet>>) {
        {
            let mut registered = self.state.registered.lock();
            for wallet in &batch {
                registered.wallets.shift_remove(&identity(wallet));
            }
            registered.snapshot = None;
        }

        info!("Unregistered {} wallet(s): {}", batch.len(), names(&batch));
        self.emit(WalletsEventName::Unregister, &batch);
    }

    fn emit(&self, event: WalletsEventName, wallets: &[Arc<dyn Wallet>]) {
        let listeners: Vec<WalletsListener> = self
            .state
            .listeners
            .lock()
            .entries
            .iter()
            .filter(|entry| entry.event == event)
            .map(|entry| entry.listener.clone())
            .collect();

        for listener in listeners {
            guard(event.as_str(), || listener(wallets));
        }
    }
}

impl WalletRegistrar for Wallets {
    fn register(&self, wallets: Vec<Arc<dyn Wallet>>) -> Unregister {
        Wallets::register(self, wallets)
    }
}

impl fmt::Debug for Wallets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallets").field("len", &self.len()).finish()
    }
}

fn names(wallets: &[Arc<dyn Wallet>]) -> String {
    wallets
        .iter()
        .map(|w| w.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Removes one listener added with `Wallets::on`
///
/// Calling `unsubscribe` more than once is harmless. Dropping the value
/// leaves the listener subscribed.
#[derive(Clone)]
pub struct Unsubscribe {
    state: Weak<WalletsState>,
    id: u64,
}

impl Unsubscribe {
    pub fn unsubscribe(&self) {
        if let Some(state) = self.state.upgrade() {
            state
                .listeners
                .lock()
                .entries
                .retain(|entry| entry.id != self.id);
        }
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use wallet_standard::{InMemoryWallet, WalletIcon};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn test_wallet(name: &str) -> Arc<dyn Wallet> {
        let icon = WalletIcon::new("data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=").unwrap();
        Arc::new(InMemoryWallet::new(name, icon))
    }

    fn recorder(wallets: &Wallets, event: WalletsEventName) -> Arc<Mutex<Vec<Vec<String>>>> {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        wallets.on(event, move |batch| {
            sink.lock().push(batch.iter().map(|w| w.name()).collect());
        });
        calls
    }

    #[test]
    fn test_register_and_get() {
        let wallets = Wallets::new();
        let a = test_wallet("A");
        let b = test_wallet("B");

        wallets.register(vec![a.clone(), b.clone()]);

        let registered = wallets.get();
        assert_eq!(registered.len(), 2);
        assert!(Arc::ptr_eq(&registered[0], &a));
        assert!(Arc::ptr_eq(&registered[1], &b));
    }

    #[test]
    fn test_get_is_cached_until_change() {
        let wallets = Wallets::new();
        wallets.register(vec![test_wallet("A")]);

        let first = wallets.get();
        let second = wallets.get();
        assert!(Arc::ptr_eq(&first, &second));

        wallets.register(vec![test_wallet("B")]);
        let third = wallets.get();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(first.len(), 1);
        assert_eq!(third.len(), 2);
    }

    #[test]
    fn test_duplicate_register_is_noop() {
        let wallets = Wallets::new();
        let calls = recorder(&wallets, WalletsEventName::Register);
        let w = test_wallet("W");

        let first = wallets.register(vec![w.clone()]);
        let second = wallets.register(vec![w.clone()]);

        assert!(!first.is_noop());
        assert!(second.is_noop());
        assert_eq!(calls.lock().len(), 1);
        assert_eq!(wallets.len(), 1);
    }

    #[test]
    fn test_duplicates_within_batch_collapse() {
        let wallets = Wallets::new();
        let calls = recorder(&wallets, WalletsEventName::Register);
        let w = test_wallet("W");

        wallets.register(vec![w.clone(), w]);

        assert_eq!(wallets.len(), 1);
        assert_eq!(*calls.lock(), vec![vec!["W".to_string()]]);
    }

    #[test]
    fn test_unregister_is_scoped_to_batch() {
        let wallets = Wallets::new();
        let unregistered = recorder(&wallets, WalletsEventName::Unregister);
        let a = test_wallet("A");
        let b = test_wallet("B");

        let off = wallets.register(vec![a.clone(), b.clone()]);
        let again = wallets.register(vec![a.clone()]);
        assert!(again.is_noop());

        off.unregister();
        assert!(wallets.is_empty());
        assert_eq!(*unregistered.lock(), vec![vec!["A".to_string(), "B".to_string()]]);

        // the no-op handle cannot remove anything
        wallets.register(vec![a]);
        again.unregister();
        assert_eq!(wallets.len(), 1);
    }

    #[test]
    fn test_listener_gets_whole_batch_once() {
        let wallets = Wallets::new();
        let calls = recorder(&wallets, WalletsEventName::Register);

        wallets.register(vec![test_wallet("A"), test_wallet("B")]);

        assert_eq!(
            *calls.lock(),
            vec![vec!["A".to_string(), "B".to_string()]]
        );
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let wallets = Wallets::new();
        let hits = Arc::new(Mutex::new(0));
        let counter = hits.clone();
        let off = wallets.on(WalletsEventName::Register, move |_| *counter.lock() += 1);
        let other = recorder(&wallets, WalletsEventName::Register);

        off.unsubscribe();
        off.unsubscribe();
        wallets.register(vec![test_wallet("A")]);

        assert_eq!(*hits.lock(), 0);
        assert_eq!(other.lock().len(), 1);
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let wallets = Wallets::new();
        wallets.on(WalletsEventName::Register, |_| panic!("listener failure"));
        let calls = recorder(&wallets, WalletsEventName::Register);

        let unregister = wallets.register(vec![test_wallet("A")]);

        assert!(!unregister.is_noop());
        assert_eq!(wallets.len(), 1);
        assert_eq!(calls.lock().len(), 1);
    }

    #[test]
    fn test_listener_may_reenter() {
        let wallets = Wallets::new();
        let inner = wallets.clone();
        let seen = Arc::new(Mutex::new(0));
        let sink = seen.clone();
        wallets.on(WalletsEventName::Register, move |_| {
            *sink.lock() = inner.get().len();
        });

        wallets.register(vec![test_wallet("A")]);
        assert_eq!(*seen.lock(), 1);
    }

    #[test]
    fn test_duplicate_register_is_silent_above_debug() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let wallets = Wallets::new();
        let w = test_wallet("W");
        wallets.register(vec![w.clone()]);

        tracing::subscriber::with_default(subscriber, || {
            let again = wallets.register(vec![w.clone(), w.clone()]);
            assert!(again.is_noop());
        });

        assert!(logs.0.lock().is_empty());
        assert_eq!(wallets.len(), 1);
    }
}
