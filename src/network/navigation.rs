//! Navigation service
//!
//! Lets code that is not part of the router (the error handler, the session
//! guard) request a page transition. The router registers its navigate
//! function once at start-up; everyone else holds a clone of the service.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Callable performing a navigation to the given path.
pub type Navigator = Arc<dyn Fn(&str) + Send + Sync>;

/// Explicitly constructed holder for the router's navigate function.
///
/// Clones share the same slot, so registering through one clone is visible
/// to all of them.
#[derive(Clone, Default)]
pub struct NavigationService {
    slot: Arc<RwLock<Option<Navigator>>>,
}

impl NavigationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the navigate function. Replaces any previously registered one.
    pub fn init<F>(&self, navigate: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            log::debug!("Replacing registered navigation function");
        }
        *slot = Some(Arc::new(navigate));
    }

    /// Forget the registered navigate function.
    pub fn dispose(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    pub fn is_registered(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Navigate to `path` if a navigate function is registered.
    ///
    /// Without one this only logs a warning. It never panics: it runs inside
    /// error handling, where a second failure would hide the first.
    pub fn navigate(&self, path: &str) {
        // Clone out of the lock so the navigate function may touch the service.
        let navigator = self
            .slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match navigator {
            Some(navigate) => navigate(path),
            None => log::warn!("Navigation function not yet set, dropping navigation to {path}"),
        }
    }
}

impl fmt::Debug for NavigationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationService")
            .field("registered", &self.is_registered())
            .finish()
    }
}
