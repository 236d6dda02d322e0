//! Candidate route sources for Stride.
//!
//! - [`trailrouter`] generates loops and out-and-back routes on demand from
//!   the TrailRouter HTTP API.
//! - [`catalog`] serves a fixed list of routes loaded from a JSON file.
//!
//! Both implement [`stride_core::CandidateSource`], so callers construct one
//! explicitly and hand it to [`stride_core::recommend_with_source`].
#![forbid(unsafe_code)]

pub mod catalog;
pub mod trailrouter;

pub use catalog::JsonCatalogSource;
pub use trailrouter::{SourceBuildError, TrailRouterConfig, TrailRouterSource};
