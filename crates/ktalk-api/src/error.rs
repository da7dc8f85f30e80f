use thiserror::Error;

/// Top-level error type for the `ktalk-api` crate.
///
/// Every HTTP failure is classified into one of four variants by the
/// transport, so callers can match on a closed set without touching
/// `reqwest` types. The originating `reqwest::Error` is kept as the
/// [`source`](std::error::Error::source) whenever one exists.
#[derive(Debug, Error)]
pub enum Error {
    // ── HTTP status classes ─────────────────────────────────────────
    /// HTTP 429. Safe to retry after a backoff; this crate never retries.
    #[error("API rate limit exceeded")]
    RateLimited {
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP 404 -- the referenced identifier does not exist.
    #[error("Resource not found")]
    NotFound {
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    /// Any other 4xx. `message` is the server's `errorMessage` when the
    /// body carried one, `"API error"` otherwise.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// 5xx, connection failures, and anything not classified above.
    /// `status` is `None` when no response was received.
    #[error("API request failed: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    // ── Local ───────────────────────────────────────────────────────
    /// Rejected before any request was sent.
    #[error("{message}")]
    Validation { message: String },

    // ── Construction ────────────────────────────────────────────────
    /// The tenant cannot form an API host (blank after trimming).
    #[error("Invalid tenant: {tenant:?}")]
    InvalidTenant { tenant: String },

    /// Base URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API key cannot be carried in an HTTP header.
    #[error("Invalid API key header value: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),

    /// The pooled HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl Error {
    /// The HTTP status behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { status, .. }
            | Self::NotFound { status, .. }
            | Self::Api { status, .. } => Some(*status),
            Self::Transport { status, .. } => *status,
            Self::Validation { .. }
            | Self::InvalidTenant { .. }
            | Self::InvalidUrl(_)
            | Self::InvalidApiKey(_)
            | Self::ClientBuild(_) => None,
        }
    }

    /// Returns `true` for HTTP 429.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Returns `true` for HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Transport { status, source, .. } => {
                source
                    .as_ref()
                    .is_some_and(|e| e.is_timeout() || e.is_connect())
                    || status.is_some_and(|s| s >= 500)
            }
            _ => false,
        }
    }
}
