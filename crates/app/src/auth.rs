//! Register / login / logout / restore / refresh orchestration.
//!
//! Synchronizes three places that can disagree: the identity service,
//! the in-memory [`SessionStore`], and the persisted session marker in
//! the local cache. The rules, in order of precedence:
//!
//! - input validation failures never reach the remote service;
//! - a rejected credential (401) forces a full local clear;
//! - logout clears local state even when the remote call fails;
//! - a failed restore never leaves a stale cached user visible.

use std::sync::Arc;

use luxstay_core::error::{CoreError, CoreResult};
use luxstay_core::user::User;
use luxstay_core::validation::{self, LoginInput, PasswordUpdateInput, RegisterInput};
use luxstay_remote::{ApiClient, ProfileUpdate};
use luxstay_store::LocalStore;

use crate::session::SessionStore;

/// Orchestrates the session lifecycle against the identity service.
pub struct AuthSessionManager {
    remote: Arc<ApiClient>,
    session: Arc<SessionStore>,
    local: Arc<LocalStore>,
}

impl AuthSessionManager {
    pub fn new(remote: Arc<ApiClient>, session: Arc<SessionStore>, local: Arc<LocalStore>) -> Self {
        Self {
            remote,
            session,
            local,
        }
    }

    /// Create an account and start a session with the returned user.
    ///
    /// Validation runs first: a short password or bad email fails here
    /// with `Validation` and no remote call is issued, session
    /// unchanged.
    pub async fn register(&self, input: RegisterInput) -> CoreResult<User> {
        validation::check(&input)?;

        let epoch = self.session.begin();
        match self.remote.register(&input).await {
            Ok(user) => self.adopt_session(epoch, user).await,
            Err(err) => Err(self.fail(err.into()).await),
        }
    }

    /// Authenticate and persist the session marker so later app starts
    /// can restore identity without re-entering credentials.
    pub async fn login(&self, input: LoginInput) -> CoreResult<User> {
        validation::check(&input)?;

        let epoch = self.session.begin();
        match self.remote.login(&input).await {
            Ok(user) => self.adopt_session(epoch, user).await,
            Err(err) => Err(self.fail(err.into()).await),
        }
    }

    /// End the session. The remote invalidation is best-effort; local
    /// state is cleared unconditionally so the UI can never get stuck
    /// logged in.
    pub async fn logout(&self) -> CoreResult<()> {
        self.session.begin();

        if let Err(err) = self.remote.logout().await {
            tracing::warn!(error = %err, "Remote logout failed; clearing local session anyway");
        }

        self.session.clear();
        self.local.clear_session().await?;
        tracing::info!("Session cleared");
        Ok(())
    }

    /// Reconstruct identity at app start.
    ///
    /// A persisted marker alone is not trusted: the authoritative
    /// profile is fetched, and any failure clears the marker and
    /// presents an unauthenticated state.
    pub async fn restore_session(&self) -> CoreResult<Option<User>> {
        if self.local.session().await?.is_none() {
            return Ok(None);
        }

        let epoch = self.session.begin();
        match self.remote.me().await {
            Ok(user) => {
                let user = self.adopt_session(epoch, user).await?;
                Ok(Some(user))
            }
            Err(err) => {
                tracing::info!(error = %err, "Session restore rejected; clearing marker");
                self.session.clear();
                self.local.clear_session().await?;
                Ok(None)
            }
        }
    }

    /// Re-fetch the profile and overwrite the cached user. Used after
    /// favorites or profile mutations elsewhere.
    pub async fn refresh(&self) -> CoreResult<User> {
        let epoch = self.session.begin();
        match self.remote.me().await {
            Ok(user) => self.adopt_session(epoch, user).await,
            Err(err) => Err(self.fail(err.into()).await),
        }
    }

    /// Update name/email via the identity service; the cached user and
    /// the marker follow the returned snapshot.
    pub async fn update_profile(&self, update: ProfileUpdate) -> CoreResult<User> {
        let epoch = self.session.begin();
        match self.remote.update_profile(&update).await {
            Ok(user) => self.adopt_session(epoch, user).await,
            Err(err) => Err(self.fail(err.into()).await),
        }
    }

    /// Change the password. The length policy applies to the new
    /// password exactly as at registration.
    pub async fn update_password(&self, input: PasswordUpdateInput) -> CoreResult<()> {
        validation::check(&input)?;

        self.session.begin();
        match self.remote.update_password(&input).await {
            Ok(()) => {
                // No user payload comes back; just settle the flags.
                self.session.finish_ok();
                Ok(())
            }
            Err(err) => Err(self.fail(err.into()).await),
        }
    }

    /// Install a fetched user as the current session: in-memory state
    /// (epoch-guarded) plus the persisted marker.
    async fn adopt_session(&self, epoch: u64, user: User) -> CoreResult<User> {
        if !self.session.apply_user(epoch, user.clone()) {
            // The session was cleared while the call was in flight;
            // do not persist a marker for a user nobody is logged in as.
            return Err(CoreError::Auth("Session ended during the operation".into()));
        }
        if let Err(err) = self.local.set_session(&user).await {
            tracing::warn!(error = %err, "Could not persist session marker");
        }
        tracing::info!(user_id = %user.id, "Session established");
        Ok(user)
    }

    /// Record a failed operation; a rejected credential additionally
    /// forces a full local clear.
    async fn fail(&self, err: CoreError) -> CoreError {
        self.session.record_error(err.to_string());
        if matches!(err, CoreError::Auth(_)) {
            self.session.clear();
            if let Err(store_err) = self.local.clear_session().await {
                tracing::error!(error = %store_err, "Failed to clear session marker");
            }
        }
        err
    }
}
