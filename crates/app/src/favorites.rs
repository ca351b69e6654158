//! Favorites toggling, synchronized with the remote profile.
//!
//! Unlike bookings there is no offline path: favorites carry no
//! monetary weight, so a remote failure surfaces as-is and local state
//! stays untouched.

use std::sync::Arc;

use luxstay_core::error::{CoreError, CoreResult};
use luxstay_remote::ApiClient;

use crate::session::SessionStore;

/// Adds and removes hotels from the current user's favorites.
pub struct FavoritesManager {
    remote: Arc<ApiClient>,
    session: Arc<SessionStore>,
}

impl FavoritesManager {
    pub fn new(remote: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self { remote, session }
    }

    /// Whether the hotel is in the cached user's favorites.
    pub fn is_favorite(&self, hotel_id: &str) -> bool {
        self.session
            .current_user()
            .is_some_and(|user| user.is_favorite(hotel_id))
    }

    /// Toggle a hotel in or out of the favorites. Returns the new
    /// membership. On success the cached user is refreshed from the
    /// profile so dependent views observe the change; on failure
    /// nothing changes locally.
    pub async fn toggle(&self, hotel_id: &str) -> CoreResult<bool> {
        let Some(user) = self.session.current_user() else {
            return Err(CoreError::Auth(
                "Please login to manage favorites".into(),
            ));
        };

        let epoch = self.session.epoch();
        let adding = !user.is_favorite(hotel_id);

        let result = if adding {
            self.remote.add_favorite(hotel_id).await
        } else {
            self.remote.remove_favorite(hotel_id).await
        };
        if let Err(err) = result {
            let core: CoreError = err.into();
            self.session.record_error(core.to_string());
            return Err(core);
        }

        tracing::info!(hotel_id, adding, "Favorites updated remotely");

        // Session refresh so profile and favorites pages see the new
        // set. If the refetch itself fails, fall back to patching the
        // cached copy; the server already accepted the change.
        match self.remote.me().await {
            Ok(fresh) => {
                self.session.apply_user(epoch, fresh);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Profile refetch after favorite toggle failed");
                let mut patched = user;
                if adding {
                    patched.favorites.push(hotel_id.to_string());
                } else {
                    patched.favorites.retain(|id| id != hotel_id);
                }
                self.session.apply_user(epoch, patched);
            }
        }

        Ok(adding)
    }
}
