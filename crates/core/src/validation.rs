//! Credential payloads and their pre-submission validation.
//!
//! Validation failures become [`CoreError::Validation`] before any
//! remote call is issued; the identity service never sees a payload
//! that failed these checks.

use serde::Serialize;
use validator::Validate;

use crate::error::{CoreError, CoreResult};

/// Minimum password length accepted at registration and password
/// change.
pub const MIN_PASSWORD_LEN: u64 = 6;

/// Payload for `POST /register`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(
        min = MIN_PASSWORD_LEN,
        message = "Password must be at least 6 characters"
    ))]
    pub password: String,
}

/// Payload for `POST /login`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Payload for `PUT /password/update`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdateInput {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub old_password: String,
    #[validate(length(
        min = MIN_PASSWORD_LEN,
        message = "Password must be at least 6 characters"
    ))]
    pub new_password: String,
}

/// Run `validator` checks and fold the first failure message into a
/// [`CoreError::Validation`].
pub fn check<T: Validate>(input: &T) -> CoreResult<()> {
    input.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|field| field.iter())
            .filter_map(|e| e.message.as_ref())
            .map(|m| m.to_string())
            .next()
            .unwrap_or_else(|| "Invalid input".to_string());
        CoreError::Validation(message)
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn register_rejects_short_password() {
        let input = RegisterInput {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "12345".into(),
        };
        assert_matches!(check(&input), Err(CoreError::Validation(msg)) => {
            assert!(msg.contains("at least 6"));
        });
    }

    #[test]
    fn register_rejects_bad_email_and_empty_name() {
        let input = RegisterInput {
            name: String::new(),
            email: "not-an-email".into(),
            password: "secret1".into(),
        };
        assert_matches!(check(&input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn password_at_exactly_the_minimum_length_is_accepted() {
        let input = RegisterInput {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "a".repeat(MIN_PASSWORD_LEN as usize),
        };
        assert!(check(&input).is_ok());
    }

    #[test]
    fn register_accepts_valid_input() {
        let input = RegisterInput {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
        };
        assert!(check(&input).is_ok());
    }

    #[test]
    fn login_requires_password_presence_only() {
        // Login does not re-apply the length policy; an older, shorter
        // password must still be able to log in.
        let input = LoginInput {
            email: "ada@example.com".into(),
            password: "12345".into(),
        };
        assert!(check(&input).is_ok());
    }
}
