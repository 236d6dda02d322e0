//! Core domain types and the recommendation engine for Stride.
//!
//! Candidate running routes arrive from a [`CandidateSource`]; the engine
//! filters them against a caller's [`RecommendationPreferences`], scores each
//! survivor across several weighted factors, and returns the best matches as
//! [`ScoredRoute`] values.
//!
//! The engine itself is a pure function over in-memory data. Everything that
//! talks to the outside world (HTTP route generators, catalogue files) lives
//! behind the [`CandidateSource`] trait and is passed in by the caller.
//!
//! # Examples
//!
//! ```
//! use stride_core::{
//!     RecommendationPreferences, Route, RouteGeometry, RouteShape, SurfaceType, recommend,
//! };
//! # fn route(id: &str, scenic_score: f64) -> Route {
//! #     Route {
//! #         id: id.to_owned(),
//! #         name: id.to_owned(),
//! #         description: None,
//! #         distance: 4.0,
//! #         elevation_gain: 50.0,
//! #         surface_type: SurfaceType::Paved,
//! #         route_shape: RouteShape::Loop,
//! #         has_lighting: true,
//! #         safety_score: 75.0,
//! #         scenic_score,
//! #         popularity: 70.0,
//! #         weather_comfort: 80.0,
//! #         geometry: RouteGeometry::from_lon_lat([(-87.6298, 41.8781)]),
//! #     }
//! # }
//!
//! let routes = vec![route("lakefront", 90.0), route("industrial", 20.0)];
//! let preferences = RecommendationPreferences::new().with_target_distance(4.0);
//!
//! let ranked = recommend(&routes, &preferences, 1);
//! assert_eq!(ranked.len(), 1);
//! assert_eq!(ranked[0].route.id, "lakefront");
//! ```

#![forbid(unsafe_code)]

pub mod distance;
pub mod engine;
pub mod preferences;
pub mod request;
pub mod route;
pub mod scorer;
pub mod source;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use distance::{EARTH_RADIUS_MILES, haversine_miles};
pub use engine::recommend;
pub use preferences::{
    DEFAULT_DISTANCE_TOLERANCE_MILES, DEFAULT_PROXIMITY_CAP_MILES, DISTANCE_MATCH_WEIGHT,
    RecommendationPreferences, ResolvedPreferences, ScoringWeights, SurfacePreference,
};
pub use request::{
    DEFAULT_LIMIT, MAX_LIMIT, RecommendRequest, RecommendResponse, RequestValidationError,
    ValidatedRequest, recommend_with_source,
};
pub use route::{Route, RouteGeometry, RouteShape, SurfaceType};
pub use scorer::{ScoreBreakdown, ScoredRoute, score_route};
pub use source::{CandidateError, CandidateQuery, CandidateSource};
