//! Domain-level error taxonomy shared across all LuxStay crates.

/// Domain errors for the booking client.
///
/// Each variant maps to a distinct handling policy:
/// - [`Validation`](CoreError::Validation) is caught at the step
///   boundary and never reaches the remote layer.
/// - [`RemoteUnavailable`](CoreError::RemoteUnavailable) triggers the
///   local-fallback path for booking create/cancel and is surfaced as a
///   dismissible message everywhere else.
/// - [`Auth`](CoreError::Auth) forces a full local session clear.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Client-detectable input problem; not retryable without user
    /// correction.
    #[error("{0}")]
    Validation(String),

    /// The remote service could not be reached or answered with a
    /// failure. Network errors, timeouts, and 4xx/5xx are treated
    /// uniformly.
    #[error("Remote service unavailable: {0}")]
    RemoteUnavailable(String),

    /// The session credential was rejected (401 / expired session).
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A referenced hotel, booking, or user does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The local durable cache could not be read or written.
    #[error("Local store error: {0}")]
    Storage(String),
}

/// Convenience alias used throughout the workspace.
pub type CoreResult<T> = Result<T, CoreError>;
