use std::sync::{Arc, Mutex, PoisonError};

use common::ViewState;

/// The session's view state, shared between the web handlers, the address
/// debouncer and in-flight toggles.
///
/// Every change goes through [`PanelState::update`], which holds the lock for
/// exactly one closure call. The lock is never held across an `.await`.
#[derive(Clone, Debug)]
pub struct PanelState {
    inner: Arc<Mutex<ViewState>>,
}

impl PanelState {
    pub fn new(view: ViewState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(view)),
        }
    }

    /// Apply one read-modify-write step.
    pub fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        // Recover from a poisoned lock; the panel stays usable.
        let mut view = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut view)
    }

    pub fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        let view = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&view)
    }

    pub fn snapshot(&self) -> ViewState {
        self.read(ViewState::clone)
    }

    pub fn is_busy(&self) -> bool {
        self.read(|view| view.busy)
    }

    /// Mark the view busy and clear the last error, unless a toggle is
    /// already in flight. Returns whether the caller now owns the busy flag.
    pub fn try_begin(&self) -> bool {
        self.update(|view| {
            if view.busy {
                return false;
            }
            view.busy = true;
            view.last_error.clear();
            true
        })
    }

    pub fn set_device_address(&self, address: impl Into<String>) {
        let address = address.into();
        self.update(|view| view.device_address = address);
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(ViewState::default())
    }
}
