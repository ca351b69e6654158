//! Identity service endpoints: register, login, logout, profile.

use serde::{Deserialize, Serialize};

use luxstay_core::user::User;
use luxstay_core::validation::{LoginInput, PasswordUpdateInput, RegisterInput};

use crate::client::ApiClient;
use crate::error::RemoteError;

/// Envelope returned by the auth endpoints:
/// `{ success, user?, token?, message? }`.
#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    #[serde(default = "default_true")]
    success: bool,
    user: Option<User>,
    message: Option<String>,
}

/// Envelope for endpoints that only acknowledge.
#[derive(Debug, Deserialize)]
struct AckEnvelope {
    #[serde(default = "default_true")]
    success: bool,
    message: Option<String>,
}

fn default_true() -> bool {
    true
}

impl AuthEnvelope {
    fn into_user(self, operation: &str) -> Result<User, RemoteError> {
        if !self.success {
            return Err(RemoteError::Rejected(
                self.message
                    .unwrap_or_else(|| format!("{operation} failed")),
            ));
        }
        self.user.ok_or_else(|| {
            RemoteError::Rejected(format!("{operation} response carried no user"))
        })
    }
}

impl AckEnvelope {
    fn into_ack(self, operation: &str) -> Result<(), RemoteError> {
        if self.success {
            Ok(())
        } else {
            Err(RemoteError::Rejected(
                self.message
                    .unwrap_or_else(|| format!("{operation} failed")),
            ))
        }
    }
}

/// Profile fields editable via `PUT /me/update`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

impl ApiClient {
    /// `POST /register` -- create an account. The session cookie is set
    /// on success, so the new user is immediately logged in.
    pub async fn register(&self, input: &RegisterInput) -> Result<User, RemoteError> {
        let response = self.http().post(self.url("/register")).json(input).send().await?;
        let envelope: AuthEnvelope = Self::parse(response).await?;
        envelope.into_user("Registration")
    }

    /// `POST /login` -- authenticate and receive the session cookie.
    pub async fn login(&self, input: &LoginInput) -> Result<User, RemoteError> {
        let response = self.http().post(self.url("/login")).json(input).send().await?;
        let envelope: AuthEnvelope = Self::parse(response).await?;
        envelope.into_user("Login")
    }

    /// `GET /logout` -- invalidate the server-side session.
    pub async fn logout(&self) -> Result<(), RemoteError> {
        let response = self.http().get(self.url("/logout")).send().await?;
        let envelope: AckEnvelope = Self::parse(response).await?;
        envelope.into_ack("Logout")
    }

    /// `GET /me` -- the authoritative profile for the current session.
    pub async fn me(&self) -> Result<User, RemoteError> {
        let response = self.http().get(self.url("/me")).send().await?;
        let envelope: AuthEnvelope = Self::parse(response).await?;
        envelope.into_user("Profile fetch")
    }

    /// `PUT /me/update` -- update profile fields, returning the new
    /// snapshot.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, RemoteError> {
        let response = self
            .http()
            .put(self.url("/me/update"))
            .json(update)
            .send()
            .await?;
        let envelope: AuthEnvelope = Self::parse(response).await?;
        envelope.into_user("Profile update")
    }

    /// `PUT /password/update`.
    pub async fn update_password(&self, input: &PasswordUpdateInput) -> Result<(), RemoteError> {
        let response = self
            .http()
            .put(self.url("/password/update"))
            .json(input)
            .send()
            .await?;
        let envelope: AckEnvelope = Self::parse(response).await?;
        envelope.into_ack("Password update")
    }
}
