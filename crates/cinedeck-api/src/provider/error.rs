//! `ProviderError` - the single failure kind surfaced by metadata fetches.

use crate::tmdb::TmdbHttpError;

/// Failure of a metadata provider request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum ProviderError {
    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),
    /// The request timed out.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// The response could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Provider message.
        message: String,
    },
    /// The provider kept rejecting requests as rate limited.
    #[error("rate limited: {0}")]
    RateLimited(String),
    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for ProviderError {
    /// Classifies a client error by walking its cause chain.
    fn from(err: anyhow::Error) -> Self {
        let message = format!("{err:#}");
        for cause in err.chain() {
            if let Some(http) = cause.downcast_ref::<TmdbHttpError>() {
                return match http {
                    TmdbHttpError::RateLimited { .. } => Self::RateLimited(message),
                    other => Self::Upstream {
                        status: other.status().as_u16(),
                        message,
                    },
                };
            }
            if let Some(transport) = cause.downcast_ref::<reqwest::Error>() {
                if transport.is_timeout() {
                    return Self::Timeout(message);
                }
                if transport.is_decode() {
                    return Self::Malformed(message);
                }
                return Self::Network(message);
            }
            if cause.is::<serde_json::Error>() {
                return Self::Malformed(message);
            }
        }
        Self::Other(message)
    }
}
