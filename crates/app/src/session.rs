//! In-memory session state shared across the app.
//!
//! One explicitly owned [`SessionStore`] is passed (via `Arc`) to every
//! manager; nothing reads ambient global state. Remote calls have no
//! ordering guarantee relative to each other, so every mutation that
//! completes an async operation is epoch-guarded: a completion that
//! started before a session clear must not resurrect the old user.

use std::sync::Mutex;

use luxstay_core::user::User;

/// Point-in-time copy of the session state, for rendering.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    /// True while any auth/profile operation is in flight (UI spinner).
    pub loading: bool,
    /// Most recent operation error; overwritten per call, cleared on
    /// the next success.
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    user: Option<User>,
    loading: bool,
    last_error: Option<String>,
    epoch: u64,
}

/// Owner of the cached current-user snapshot.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: Mutex<Inner>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.lock().expect("session lock poisoned");
        SessionSnapshot {
            user: inner.user.clone(),
            loading: inner.loading,
            last_error: inner.last_error.clone(),
        }
    }

    /// The cached user, if logged in.
    pub fn current_user(&self) -> Option<User> {
        self.inner.lock().expect("session lock poisoned").user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.lock().expect("session lock poisoned").user.is_some()
    }

    /// Epoch at the start of an async operation. Pass it back to
    /// [`apply_user`](Self::apply_user) when the operation completes.
    pub fn epoch(&self) -> u64 {
        self.inner.lock().expect("session lock poisoned").epoch
    }

    /// Mark an operation in flight and capture the current epoch.
    pub fn begin(&self) -> u64 {
        let mut inner = self.inner.lock().expect("session lock poisoned");
        inner.loading = true;
        inner.epoch
    }

    /// Apply a fetched user snapshot if the session has not been
    /// cleared since `epoch` was captured. Returns whether it applied.
    /// Clears the error slot and the loading flag either way.
    pub fn apply_user(&self, epoch: u64, user: User) -> bool {
        let mut inner = self.inner.lock().expect("session lock poisoned");
        inner.loading = false;
        if inner.epoch != epoch {
            tracing::debug!(user_id = %user.id, "Dropping stale session update");
            return false;
        }
        inner.user = Some(user);
        inner.last_error = None;
        true
    }

    /// Settle the flags after a successful operation that carries no
    /// user payload: loading off, error slot cleared, user untouched.
    pub fn finish_ok(&self) {
        let mut inner = self.inner.lock().expect("session lock poisoned");
        inner.loading = false;
        inner.last_error = None;
    }

    /// Record a failed operation.
    pub fn record_error(&self, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("session lock poisoned");
        inner.loading = false;
        inner.last_error = Some(message.into());
    }

    /// Clear the session unconditionally and bump the epoch so any
    /// in-flight completion is discarded.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("session lock poisoned");
        inner.user = None;
        inner.loading = false;
        inner.epoch += 1;
    }
}
