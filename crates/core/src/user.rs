//! User account model and roles.

use serde::{Deserialize, Serialize};

use crate::types::{HotelId, UserId};

/// Account role. Everything that is not an admin is a regular user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// A user account as returned by the identity service.
///
/// The client holds a cached snapshot whose lifetime equals the session
/// lifetime; it is refreshed after profile or favorites mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    /// Hotel ids the user has favorited. Absent on the wire for users
    /// who never favorited anything.
    #[serde(default)]
    pub favorites: Vec<HotelId>,
}

impl User {
    /// Whether the given hotel is in this user's favorites.
    pub fn is_favorite(&self, hotel_id: &str) -> bool {
        self.favorites.iter().any(|id| id == hotel_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_deserializes_with_missing_optional_fields() {
        // Minimal payload: the backend omits `role` and `favorites` for
        // plain accounts that never favorited anything.
        let json = r#"{"_id":"u1","name":"Ada","email":"ada@example.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::User);
        assert!(user.favorites.is_empty());
    }

    #[test]
    fn role_round_trips_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn is_favorite_checks_membership() {
        let user = User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: Role::User,
            favorites: vec!["h1".into(), "h2".into()],
        };

        assert!(user.is_favorite("h2"));
        assert!(!user.is_favorite("h3"));
    }
}
