//! Configuration for [`super::TrailRouterSource`].

use std::time::Duration;

use thiserror::Error;

/// Default user agent for TrailRouter requests.
pub const DEFAULT_USER_AGENT: &str = "stride-trailrouter/0.1";

/// Number of candidate requests made per query unless configured.
pub const DEFAULT_CANDIDATE_COUNT: usize = 6;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors raised while constructing a [`super::TrailRouterSource`].
#[derive(Debug, Error)]
pub enum SourceBuildError {
    /// The configured base URL does not parse.
    #[error("invalid TrailRouter base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The Tokio runtime could not be built.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Settings for [`super::TrailRouterSource`].
///
/// A configuration without a base URL is valid: the source then returns no
/// candidates and logs a warning on each query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailRouterConfig {
    /// Endpoint URL, used exactly as given apart from the query string.
    pub base_url: Option<String>,
    /// Bearer token sent in the `Authorization` header.
    pub api_key: Option<String>,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Number of candidate requests per query.
    pub candidate_count: usize,
    /// Seed for the per-candidate distance variation; random when unset.
    pub seed: Option<u64>,
}

impl Default for TrailRouterConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            candidate_count: DEFAULT_CANDIDATE_COUNT,
            seed: None,
        }
    }
}

impl TrailRouterConfig {
    /// Create a configuration for the given endpoint.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    /// Create a configuration with no endpoint.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the number of candidate requests per query.
    #[must_use]
    pub const fn with_candidate_count(mut self, count: usize) -> Self {
        self.candidate_count = count;
        self
    }

    /// Fix the seed for the distance variation.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
