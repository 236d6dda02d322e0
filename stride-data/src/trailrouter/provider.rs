//! HTTP-backed [`CandidateSource`] for the TrailRouter API.

use reqwest::Client;
use stride_core::{
    CandidateError, CandidateQuery, CandidateSource, Route, RouteGeometry, RouteShape,
    SurfaceType,
};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::config::{SourceBuildError, TrailRouterConfig};
use super::params::{FEET_PER_METRE, METRES_PER_MILE, candidate_url, distance_factors};
use super::response::RoutesResponse;

/// Longest error-body excerpt kept in [`CandidateError::Http`].
const ERROR_BODY_EXCERPT_CHARS: usize = 200;

// TrailRouter reports no surface, lighting or popularity data, so generated
// routes carry fixed mid-range attributes.
const GENERATED_SAFETY_SCORE: f64 = 75.0;
const GENERATED_SCENIC_SCORE: f64 = 75.0;
const GENERATED_POPULARITY: f64 = 70.0;
const GENERATED_WEATHER_COMFORT: f64 = 80.0;

/// Candidate source that generates routes with TrailRouter.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime, requests run on a current-thread runtime owned
/// by the source and reused across calls. Inside a multi-threaded runtime
/// the caller's handle is used with [`tokio::task::block_in_place`]. Inside
/// a `current_thread` runtime the owned runtime is used, which blocks the
/// caller's runtime for the duration of the call.
///
/// Candidates are requested one after another; a failed request is logged
/// at `warn` and skipped.
pub struct TrailRouterSource {
    client: Client,
    config: TrailRouterConfig,
    endpoint: Option<Url>,
    runtime: Runtime,
}

impl std::fmt::Debug for TrailRouterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrailRouterSource")
            .field("client", &self.client)
            .field("endpoint", &self.endpoint)
            .field("candidate_count", &self.config.candidate_count)
            .field("seed", &self.config.seed)
            .field("api_key", &self.config.api_key.as_ref().map(|_| "<redacted>"))
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl TrailRouterSource {
    /// Create a source for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceBuildError> {
        Self::with_config(TrailRouterConfig::new(base_url))
    }

    /// Create a source from explicit configuration.
    ///
    /// A missing or blank base URL is accepted; such a source answers every
    /// query with no candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: TrailRouterConfig) -> Result<Self, SourceBuildError> {
        let endpoint = config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| {
                Url::parse(url).map_err(|source| SourceBuildError::InvalidBaseUrl {
                    url: url.to_owned(),
                    source,
                })
            })
            .transpose()?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(SourceBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SourceBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            endpoint,
            runtime,
        })
    }

    /// The configuration this source was built with.
    #[must_use]
    pub const fn config(&self) -> &TrailRouterConfig {
        &self.config
    }

    /// Request every candidate, keeping those that convert cleanly.
    async fn fetch_all(&self, endpoint: &Url, query: &CandidateQuery) -> Vec<Route> {
        let factors = distance_factors(self.config.candidate_count, self.config.seed);
        let mut routes = Vec::with_capacity(factors.len());
        for (index, factor) in factors.into_iter().enumerate() {
            let url = candidate_url(endpoint, query, factor);
            log::debug!("TrailRouter candidate {} request: {url}", index + 1);
            match self.fetch_candidate(url, index, query).await {
                Ok(route) => routes.push(route),
                Err(err) => log::warn!("TrailRouter candidate {} skipped: {err}", index + 1),
            }
        }
        routes
    }

    async fn fetch_candidate(
        &self,
        url: Url,
        index: usize,
        query: &CandidateQuery,
    ) -> Result<Route, CandidateError> {
        let url_text = url.to_string();
        let mut request = self.client.get(url);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url_text))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CandidateError::Http {
                url: url_text,
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_EXCERPT_CHARS).collect(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url_text))?;
        let payload: RoutesResponse =
            serde_json::from_str(&body).map_err(|err| CandidateError::Parse {
                message: err.to_string(),
            })?;
        build_route(index, query, payload)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> CandidateError {
        if error.is_timeout() {
            return CandidateError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return CandidateError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        CandidateError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl CandidateSource for TrailRouterSource {
    /// Generate candidates around `query.origin`.
    ///
    /// Never fails: per-candidate errors are logged and skipped, and an
    /// unconfigured source returns no candidates.
    fn candidates(&self, query: &CandidateQuery) -> Result<Vec<Route>, CandidateError> {
        let Some(endpoint) = &self.endpoint else {
            log::warn!("TrailRouter base URL not configured; skipping route generation");
            return Ok(Vec::new());
        };

        let future = self.fetch_all(endpoint, query);
        let routes = match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        };
        log::debug!(
            "TrailRouter produced {} of {} candidates",
            routes.len(),
            self.config.candidate_count
        );
        Ok(routes)
    }
}

/// Convert the first route of a TrailRouter answer into a [`Route`].
#[expect(
    clippy::float_arithmetic,
    reason = "converts metres to miles and feet"
)]
fn build_route(
    index: usize,
    query: &CandidateQuery,
    payload: RoutesResponse,
) -> Result<Route, CandidateError> {
    let generated = payload
        .into_first_route()
        .ok_or_else(|| CandidateError::Parse {
            message: "response contains no routes".to_owned(),
        })?;
    let coordinates = generated.coordinates();
    if coordinates.is_empty() {
        return Err(CandidateError::Parse {
            message: "route has no usable coordinates".to_owned(),
        });
    }

    let miles = generated.distance.unwrap_or(0.0) / METRES_PER_MILE;
    let feet = generated.ascent.unwrap_or(0.0) * FEET_PER_METRE;
    let (lat, lng) = (query.origin.y, query.origin.x);
    let (shape, label) = match query.shape {
        RouteShape::Loop => (RouteShape::Loop, "Loop"),
        RouteShape::OutAndBack | RouteShape::PointToPoint => (RouteShape::OutAndBack, "Out & Back"),
    };

    Ok(Route {
        id: format!("trailrouter-{lat:.4}-{lng:.4}-{index}"),
        name: format!("TrailRouter {label} #{} ({miles:.1} mi)", index + 1),
        description: Some(format!("Generated route near {lat:.4}, {lng:.4}")),
        distance: miles,
        elevation_gain: feet,
        surface_type: SurfaceType::Mixed,
        route_shape: shape,
        has_lighting: true,
        safety_score: GENERATED_SAFETY_SCORE,
        scenic_score: GENERATED_SCENIC_SCORE,
        popularity: GENERATED_POPULARITY,
        weather_comfort: GENERATED_WEATHER_COMFORT,
        geometry: RouteGeometry::new(coordinates),
    })
}
