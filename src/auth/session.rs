//! Process-wide session state

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::types::User;

/// Snapshot of the session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The signed-in user, if any
    pub user: Option<User>,

    /// Whether a status check is in flight
    pub loading: bool,
}

/// Shared handle to the session state
///
/// Cloning the handle shares the state. It is written only by the status
/// check and by logout; everything else reads it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<Mutex<SessionState>>,
}

impl Session {
    /// Create an empty, signed-out session
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The signed-in user
    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    /// Whether a user is present
    pub fn is_authenticated(&self) -> bool {
        self.lock().user.is_some()
    }

    /// Whether a status check is in flight
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Mark the start of a status check
    pub(crate) fn begin_check(&self) {
        self.lock().loading = true;
    }

    /// Finish a status check, storing its outcome
    pub(crate) fn finish_check(&self, user: Option<User>) {
        let mut state = self.lock();
        state.user = user;
        state.loading = false;
    }

    /// Forget the signed-in user
    pub(crate) fn clear(&self) {
        self.lock().user = None;
    }
}
