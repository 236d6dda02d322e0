//! Candidate-source trait and the query passed to it.

use geo::Coord;

use crate::{RecommendationPreferences, Route, RouteShape};

use super::error::CandidateError;

/// What a caller asks a [`CandidateSource`] for.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateQuery {
    /// Where the routes should start (`x = longitude`, `y = latitude`).
    pub origin: Coord<f64>,
    /// Desired route length in miles.
    pub target_distance_miles: f64,
    /// Desired shape.
    pub shape: RouteShape,
    /// The caller's preferences, for sources that can steer generation.
    pub preferences: RecommendationPreferences,
}

/// Produce candidate routes for a query.
///
/// Implementations may return fewer routes than they attempted, or none at
/// all. Returned routes are handed to the engine unchanged.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use stride_core::{
///     CandidateError, CandidateQuery, CandidateSource, RecommendationPreferences, Route,
///     RouteShape,
/// };
///
/// struct NoRoutes;
///
/// impl CandidateSource for NoRoutes {
///     fn candidates(&self, _query: &CandidateQuery) -> Result<Vec<Route>, CandidateError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let query = CandidateQuery {
///     origin: Coord { x: -87.63, y: 41.88 },
///     target_distance_miles: 4.0,
///     shape: RouteShape::Loop,
///     preferences: RecommendationPreferences::new(),
/// };
/// assert!(NoRoutes.candidates(&query)?.is_empty());
/// # Ok::<(), CandidateError>(())
/// ```
pub trait CandidateSource {
    /// Return candidate routes for `query`.
    ///
    /// # Errors
    ///
    /// Returns a [`CandidateError`] when the source itself fails.
    fn candidates(&self, query: &CandidateQuery) -> Result<Vec<Route>, CandidateError>;
}

impl<S: CandidateSource + ?Sized> CandidateSource for Box<S> {
    fn candidates(&self, query: &CandidateQuery) -> Result<Vec<Route>, CandidateError> {
        (**self).candidates(query)
    }
}
