//! Candidate routes generated by the TrailRouter API.
//!
//! [`TrailRouterSource`] asks TrailRouter for several routes around the
//! user's location, each with a slightly different target distance, and
//! converts the first route of every successful answer into a
//! [`stride_core::Route`].
//!
//! # Architecture
//!
//! The [`stride_core::CandidateSource`] trait is synchronous. The source
//! bridges to the async `reqwest` client by blocking on a Tokio runtime it
//! owns, or on the caller's multi-threaded runtime when one is running.
//!
//! Individual candidate requests may fail (bad status, transport error,
//! empty payload). Those failures are logged and skipped so one bad answer
//! does not discard the rest.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geo::Coord;
//! use stride_core::{CandidateQuery, CandidateSource, RecommendationPreferences, RouteShape};
//! use stride_data::{TrailRouterConfig, TrailRouterSource};
//!
//! let config = TrailRouterConfig::new("https://trailrouter.com/ors/experimentalroutes")
//!     .with_timeout(Duration::from_secs(20))
//!     .with_candidate_count(4)
//!     .with_seed(7);
//! let source = TrailRouterSource::with_config(config)?;
//!
//! let query = CandidateQuery {
//!     origin: Coord { x: -87.6298, y: 41.8781 },
//!     target_distance_miles: 4.0,
//!     shape: RouteShape::Loop,
//!     preferences: RecommendationPreferences::new().with_target_distance(4.0),
//! };
//! let routes = source.candidates(&query)?;
//! println!("{} candidates", routes.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod params;
mod provider;
mod response;

pub use config::{
    DEFAULT_CANDIDATE_COUNT, DEFAULT_USER_AGENT, SourceBuildError, TrailRouterConfig,
};
pub use provider::TrailRouterSource;
