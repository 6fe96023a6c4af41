//! Error types and handling for strobe-core operations.
//!
//! Per-load failures (network faults, bad status codes, undecodable bodies)
//! are recoverable by replaying the same request; configuration faults are
//! startup-time problems and are not. [`Error::is_recoverable`] encodes that
//! split so callers can decide whether a retry affordance makes sense.

use thiserror::Error;

/// The main error type for strobe-core operations.
///
/// All public functions in strobe-core return `Result<T, Error>`. A failed
/// page load carries one of these as the `Error` arm of the load result;
/// the engine never lets a remote failure escape as a panic.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure talking to the remote source.
    ///
    /// Covers connection failures, timeouts, and TLS problems. The underlying
    /// `reqwest::Error` is preserved for detailed inspection.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote source answered with a non-success status code.
    #[error("HTTP {status} from '{url}'")]
    Http {
        /// Status code returned by the server (e.g. 401, 429, 503).
        status: u16,
        /// URL of the failed request.
        url: String,
    },

    /// The response body could not be decoded as the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// A missing or blank access key, malformed TOML, or an undeterminable
    /// config directory. These are provisioning faults, distinct from
    /// per-load errors: they surface before any page is requested.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O failure reading or writing the configuration file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl Error {
    /// Check whether retrying the same request might succeed.
    ///
    /// Returns `true` for transient failures: connection errors, timeouts,
    /// rate limiting, and server-side 5xx responses. Decode and
    /// configuration errors are permanent - the same request will fail the
    /// same way.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Decode(_) | Self::Config(_) | Self::InvalidUrl(_) | Self::Io(_) => false,
        }
    }
}

/// Result alias used throughout strobe-core.
pub type Result<T> = std::result::Result<T, Error>;
