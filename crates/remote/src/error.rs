//! Remote-layer errors and their mapping into the domain taxonomy.

use luxstay_core::error::CoreError;

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status code.
    #[error("Backend error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or the raw body when unparseable.
        message: String,
    },

    /// A 2xx response whose envelope carried `success: false`.
    #[error("{0}")]
    Rejected(String),
}

impl RemoteError {
    /// HTTP status, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Map into the domain taxonomy for a fetch of a specific entity,
    /// so a 404 names what was missing.
    pub fn into_core_for(self, entity: &'static str, id: &str) -> CoreError {
        if self.status() == Some(404) {
            return CoreError::NotFound {
                entity,
                id: id.to_string(),
            };
        }
        self.into()
    }
}

impl From<RemoteError> for CoreError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Api { status: 401, message } => CoreError::Auth(message),
            other => CoreError::RemoteUnavailable(other.to_string()),
        }
    }
}
