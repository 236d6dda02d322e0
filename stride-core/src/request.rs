//! Recommendation requests as received from callers, and their responses.
//!
//! A [`RecommendRequest`] is the loosely-typed payload an HTTP handler or
//! CLI receives. [`RecommendRequest::validate`] checks the fields a
//! meaningful recommendation needs (a starting location and a target
//! distance) and applies the result-limit policy, producing a
//! [`ValidatedRequest`] that [`recommend_with_source`] can run.

use geo::Coord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::recommend;
use crate::{
    CandidateError, CandidateQuery, CandidateSource, RecommendationPreferences, RouteShape,
    ScoredRoute,
};

/// Number of results returned when the caller does not ask for a count.
pub const DEFAULT_LIMIT: u32 = 3;

/// Largest number of results a caller may request; larger values are clamped.
pub const MAX_LIMIT: u32 = 50;

const NO_ROUTES_MESSAGE: &str = "No routes found. Please try a different starting location.";

/// Raw recommendation request.
///
/// Preference fields are flattened, so a request reads as
/// `{"userLat": 41.88, "userLng": -87.63, "targetDistance": 4, "limit": 5}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    /// Scoring and filtering preferences, including the user location.
    #[serde(flatten)]
    pub preferences: RecommendationPreferences,
    /// Requested number of results. Any JSON number is accepted; fractional
    /// limits are truncated once validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    /// Requested route shape; loops when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_type: Option<RouteShape>,
}

/// Reasons a [`RecommendRequest`] cannot be served.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestValidationError {
    /// `userLat` or `userLng` was not supplied.
    #[error("missing starting location (userLat and userLng are required)")]
    MissingLocation,
    /// The starting location was not a finite coordinate.
    #[error("invalid latitude or longitude")]
    InvalidLocation,
    /// The limit was below one or not a number.
    #[error("limit must be at least 1, got {limit}")]
    InvalidLimit {
        /// The rejected limit.
        limit: f64,
    },
    /// `targetDistance` was missing, zero, or negative.
    #[error("targetDistance is required and must be greater than 0")]
    MissingTargetDistance,
    /// Only loops and out-and-back routes can be generated.
    #[error("route type {shape} cannot be generated; use loop or out-and-back")]
    UnsupportedRouteShape {
        /// The rejected shape.
        shape: RouteShape,
    },
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// Starting location (`x = longitude`, `y = latitude`).
    pub origin: Coord<f64>,
    /// Desired route length in miles.
    pub target_distance_miles: f64,
    /// Result count, within `1..=MAX_LIMIT`.
    pub limit: usize,
    /// Shape to request from the candidate source.
    pub shape: RouteShape,
    /// Preferences to score with.
    pub preferences: RecommendationPreferences,
}

impl ValidatedRequest {
    /// The query to send to a [`CandidateSource`].
    #[must_use]
    pub fn candidate_query(&self) -> CandidateQuery {
        CandidateQuery {
            origin: self.origin,
            target_distance_miles: self.target_distance_miles,
            shape: self.shape,
            preferences: self.preferences.clone(),
        }
    }
}

impl RecommendRequest {
    /// Check the request and apply the limit policy.
    ///
    /// Checks run in order: location, limit, target distance, route shape.
    ///
    /// # Errors
    ///
    /// Returns the first [`RequestValidationError`] encountered.
    ///
    /// # Examples
    /// ```
    /// use stride_core::{RecommendRequest, RequestValidationError};
    ///
    /// let request: RecommendRequest = serde_json::from_str(
    ///     r#"{"userLat": 41.88, "userLng": -87.63, "targetDistance": 4, "limit": 80}"#,
    /// )?;
    /// let validated = request.validate().expect("request is valid");
    /// assert_eq!(validated.limit, 50);
    ///
    /// let missing = RecommendRequest::default().validate();
    /// assert_eq!(missing, Err(RequestValidationError::MissingLocation));
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    pub fn validate(&self) -> Result<ValidatedRequest, RequestValidationError> {
        let origin = self.origin()?;
        let limit = self.resolved_limit()?;
        let target_distance_miles = self.target_distance()?;
        let shape = self.shape()?;
        Ok(ValidatedRequest {
            origin,
            target_distance_miles,
            limit,
            shape,
            preferences: self.preferences.clone(),
        })
    }

    fn origin(&self) -> Result<Coord<f64>, RequestValidationError> {
        let origin = self
            .preferences
            .user_location()
            .ok_or(RequestValidationError::MissingLocation)?;
        if origin.x.is_finite() && origin.y.is_finite() {
            Ok(origin)
        } else {
            Err(RequestValidationError::InvalidLocation)
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the limit is checked to lie in 1..=MAX_LIMIT before truncating"
    )]
    fn resolved_limit(&self) -> Result<usize, RequestValidationError> {
        let requested = self.limit.unwrap_or(f64::from(DEFAULT_LIMIT));
        if requested.is_nan() || requested < 1.0 {
            return Err(RequestValidationError::InvalidLimit { limit: requested });
        }
        Ok(requested.min(f64::from(MAX_LIMIT)).trunc() as usize)
    }

    fn target_distance(&self) -> Result<f64, RequestValidationError> {
        match self.preferences.target_distance {
            Some(miles) if miles > 0.0 && miles.is_finite() => Ok(miles),
            _ => Err(RequestValidationError::MissingTargetDistance),
        }
    }

    fn shape(&self) -> Result<RouteShape, RequestValidationError> {
        match self.route_type.unwrap_or(RouteShape::Loop) {
            RouteShape::PointToPoint => Err(RequestValidationError::UnsupportedRouteShape {
                shape: RouteShape::PointToPoint,
            }),
            shape => Ok(shape),
        }
    }
}

/// Ranked routes returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    /// Routes, best first.
    pub routes: Vec<ScoredRoute>,
    /// Number of routes returned.
    pub count: usize,
    /// Preferences the routes were scored with.
    pub preferences: RecommendationPreferences,
    /// Human-readable note, set when no candidates were found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Fetch candidates for `request` from `source` and rank them.
///
/// A source that finds nothing produces an empty response carrying a
/// message rather than an error.
///
/// # Errors
///
/// Propagates the [`CandidateError`] raised by `source`.
///
/// # Examples
/// ```
/// use stride_core::{
///     CandidateError, CandidateQuery, CandidateSource, RecommendRequest, Route,
///     recommend_with_source,
/// };
///
/// struct Catalogue(Vec<Route>);
///
/// impl CandidateSource for Catalogue {
///     fn candidates(&self, _query: &CandidateQuery) -> Result<Vec<Route>, CandidateError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let route: Route = serde_json::from_value(serde_json::json!({
///     "id": "r1", "name": "Lakefront", "distance": 4.0, "elevationGain": 50.0,
///     "surfaceType": "paved", "routeShape": "loop", "hasLighting": true,
///     "safetyScore": 75.0, "scenicScore": 75.0, "popularity": 70.0, "weatherComfort": 80.0,
///     "geojson": {"type": "LineString", "coordinates": [[-87.6298, 41.8781]]},
/// }))
/// .expect("valid route JSON");
/// let source = Catalogue(vec![route]);
/// let request: RecommendRequest =
///     serde_json::from_str(r#"{"userLat": 41.8781, "userLng": -87.6298, "targetDistance": 4}"#)
///         .expect("valid JSON");
/// let validated = request.validate().expect("valid request");
///
/// let response = recommend_with_source(&source, &validated).expect("stub succeeds");
/// assert_eq!(response.count, 1);
/// ```
pub fn recommend_with_source<S>(
    source: &S,
    request: &ValidatedRequest,
) -> Result<RecommendResponse, CandidateError>
where
    S: CandidateSource + ?Sized,
{
    let candidates = source.candidates(&request.candidate_query())?;
    if candidates.is_empty() {
        log::info!(
            "no candidate routes near {:.4}, {:.4}",
            request.origin.y,
            request.origin.x
        );
        return Ok(RecommendResponse {
            routes: Vec::new(),
            count: 0,
            preferences: request.preferences.clone(),
            message: Some(NO_ROUTES_MESSAGE.to_owned()),
        });
    }

    let routes = recommend(&candidates, &request.preferences, request.limit);
    Ok(RecommendResponse {
        count: routes.len(),
        routes,
        preferences: request.preferences.clone(),
        message: None,
    })
}
