use thiserror::Error;

/// Errors from [`crate::source::CandidateSource::candidates`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateError {
    /// The request could not reach the service.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// URL that was requested.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// URL that was requested.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// A payload could not be decoded.
    #[error("failed to parse candidate routes: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// A local catalogue could not be read.
    #[error("failed to read candidate routes from {path}: {message}")]
    Io {
        /// Path that was read.
        path: String,
        /// I/O error description.
        message: String,
    },
}
