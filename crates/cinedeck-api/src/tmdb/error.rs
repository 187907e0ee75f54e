//! Typed HTTP failures raised by `TmdbClient`.

use reqwest::StatusCode;

/// Non-success outcome of a TMDB request.
///
/// Returned inside `anyhow::Error` so callers can still `downcast_ref`
/// to tell upstream failures apart from transport or decode errors.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbHttpError {
    /// TMDB answered with its JSON error envelope.
    #[error("TMDB API error (HTTP {status}): code={code}, message={message}")]
    Api {
        /// HTTP status.
        status: StatusCode,
        /// TMDB `status_code`.
        code: u32,
        /// TMDB `status_message`.
        message: String,
    },
    /// Non-success status with an unrecognized body.
    #[error("TMDB API error (HTTP {status}): {body}")]
    Http {
        /// HTTP status.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },
    /// HTTP 429 persisted through every retry.
    #[error("TMDB API rate limit exceeded after {retries} retries: {path}")]
    RateLimited {
        /// Retries attempted.
        retries: u32,
        /// Request path.
        path: String,
    },
}

impl TmdbHttpError {
    /// HTTP status code of the failure.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Api { status, .. } | Self::Http { status, .. } => *status,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}
