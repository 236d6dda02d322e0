//! Facade crate for the Stride running-route recommendation engine.
//!
//! This crate re-exports the core domain types and engine, and exposes the
//! catalogue and TrailRouter candidate sources behind the
//! `source-trailrouter` feature.

#![forbid(unsafe_code)]

pub use stride_core::{
    CandidateError, CandidateQuery, CandidateSource, RecommendRequest, RecommendResponse,
    RecommendationPreferences, RequestValidationError, Route, RouteGeometry, RouteShape,
    ScoreBreakdown, ScoredRoute, SurfacePreference, SurfaceType, ValidatedRequest,
    haversine_miles, recommend, recommend_with_source,
};

#[cfg(feature = "source-trailrouter")]
pub use stride_data::{JsonCatalogSource, SourceBuildError, TrailRouterConfig, TrailRouterSource};
