//! Legacy `navigator.wallets` slot
//!
//! Before the event protocol, wallets pushed a callback onto a global list
//! and apps drained it. The slot starts out as a plain list of pending
//! callbacks; once an app installs itself, it becomes a live `push` that
//! invokes new callbacks immediately.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use super::WindowError;
use crate::register::WalletsRegisterApi;
use crate::util::guard;

/// Callback pushed onto `navigator.wallets`
pub type LegacyRegisterCallback = Arc<dyn Fn(&WalletsRegisterApi) + Send + Sync>;

enum SlotState {
    Pending(Vec<LegacyRegisterCallback>),
    Live(WalletsRegisterApi),
}

/// The `navigator.wallets` slot of a window
pub struct NavigatorWallets {
    state: Mutex<SlotState>,
}

impl NavigatorWallets {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState::Pending(Vec::new())),
        }
    }

    /// Push a callback: queued until an app installs itself, invoked
    /// immediately afterwards
    pub fn push(&self, callback: LegacyRegisterCallback) {
        let api = {
            let mut state = self.state.lock();
            match &mut *state {
                SlotState::Pending(callbacks) => {
                    callbacks.push(callback);
                    debug!("Queued navigator.wallets callback ({} pending)", callbacks.len());
                    return;
                }
                SlotState::Live(api) => api.clone(),
            }
        };

        guard("navigator.wallets callback", || callback(&api));
    }

    /// Replace the pending list with a live push bound to `api`, returning
    /// the callbacks that were waiting
    ///
    /// The slot can only be installed once; later attempts fail like a
    /// redefinition of a frozen property.
    pub fn install(
        &self,
        api: WalletsRegisterApi,
    ) -> Result<Vec<LegacyRegisterCallback>, WindowError> {
        let mut state = self.state.lock();
        match std::mem::replace(&mut *state, SlotState::Live(api)) {
            SlotState::Pending(callbacks) => Ok(callbacks),
            previous @ SlotState::Live(_) => {
                *state = previous;
                Err(WindowError::NavigatorWalletsLocked)
            }
        }
    }

    /// Number of callbacks waiting for an app
    pub fn pending_len(&self) -> usize {
        match &*self.state.lock() {
            SlotState::Pending(callbacks) => callbacks.len(),
            SlotState::Live(_) => 0,
        }
    }

    /// Whether an app has installed its live push
    pub fn is_live(&self) -> bool {
        matches!(&*self.state.lock(), SlotState::Live(_))
    }
}

impl Default for NavigatorWallets {
    fn default() -> Self {
        Self::new()
    }
}
