//! Route-level access decisions.
//!
//! Pure and synchronous: given the cached user and the role a route
//! requires, decide whether to render or where to send the visitor.
//! No network or storage side effects.

use crate::user::{Role, User};

/// Path of the login page, the target for unauthenticated visitors.
pub const LOGIN_PATH: &str = "/login";
/// Path of the home page, the target for non-admins on admin routes.
pub const HOME_PATH: &str = "/";

/// Role a route requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    /// Any logged-in user.
    Authenticated,
    /// Admin accounts only.
    Admin,
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    RedirectTo(&'static str),
}

/// Decide whether `user` may enter a route requiring `required`.
///
/// Unauthenticated visitors go to the login page; authenticated
/// non-admins hitting an admin route go home. Applied uniformly --
/// there is no separate "access denied" view.
pub fn decide(user: Option<&User>, required: RequiredRole) -> AccessDecision {
    match required {
        RequiredRole::Authenticated => match user {
            Some(_) => AccessDecision::Allow,
            None => AccessDecision::RedirectTo(LOGIN_PATH),
        },
        RequiredRole::Admin => match user {
            Some(user) if user.role == Role::Admin => AccessDecision::Allow,
            Some(_) => AccessDecision::RedirectTo(HOME_PATH),
            None => AccessDecision::RedirectTo(LOGIN_PATH),
        },
    }
}
