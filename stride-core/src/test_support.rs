//! Builders and stub sources shared by unit, behaviour and property tests.

use std::cell::RefCell;

use geo::Coord;

use crate::{
    CandidateError, CandidateQuery, CandidateSource, RecommendationPreferences, Route,
    RouteGeometry, RouteShape, SurfaceType,
};

/// Fluent builder for [`Route`] values with unremarkable defaults.
///
/// Defaults: 4.0 miles, 50 ft of climb, paved loop, lit, safety 75,
/// scenic 75, popularity 70, weather comfort 80, and a single-point
/// geometry in downtown Chicago.
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    route: Route,
}

impl RouteBuilder {
    /// Start building a route with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            route: Route {
                name: format!("Route {id}"),
                id,
                description: None,
                distance: 4.0,
                elevation_gain: 50.0,
                surface_type: SurfaceType::Paved,
                route_shape: RouteShape::Loop,
                has_lighting: true,
                safety_score: 75.0,
                scenic_score: 75.0,
                popularity: 70.0,
                weather_comfort: 80.0,
                geometry: RouteGeometry::from_lon_lat([(-87.6298, 41.8781)]),
            },
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.route.name = name.into();
        self
    }

    /// Set the length in miles.
    #[must_use]
    pub const fn distance(mut self, miles: f64) -> Self {
        self.route.distance = miles;
        self
    }

    /// Set the climb in feet.
    #[must_use]
    pub const fn elevation_gain(mut self, feet: f64) -> Self {
        self.route.elevation_gain = feet;
        self
    }

    /// Set the surface.
    #[must_use]
    pub const fn surface(mut self, surface: SurfaceType) -> Self {
        self.route.surface_type = surface;
        self
    }

    /// Set the shape.
    #[must_use]
    pub const fn shape(mut self, shape: RouteShape) -> Self {
        self.route.route_shape = shape;
        self
    }

    /// Set whether the route is lit.
    #[must_use]
    pub const fn lit(mut self, lit: bool) -> Self {
        self.route.has_lighting = lit;
        self
    }

    /// Set the safety score.
    #[must_use]
    pub const fn safety_score(mut self, score: f64) -> Self {
        self.route.safety_score = score;
        self
    }

    /// Set the scenic score.
    #[must_use]
    pub const fn scenic_score(mut self, score: f64) -> Self {
        self.route.scenic_score = score;
        self
    }

    /// Set the popularity.
    #[must_use]
    pub const fn popularity(mut self, score: f64) -> Self {
        self.route.popularity = score;
        self
    }

    /// Replace the geometry.
    #[must_use]
    pub fn geometry(mut self, geometry: RouteGeometry) -> Self {
        self.route.geometry = geometry;
        self
    }

    /// Replace the geometry with a single start point.
    #[must_use]
    pub fn start_at(self, lat: f64, lng: f64) -> Self {
        self.geometry(RouteGeometry::new(vec![Coord { x: lng, y: lat }]))
    }

    /// Finish the route.
    #[must_use]
    pub fn build(self) -> Route {
        self.route
    }
}

/// A loop query for four miles from downtown Chicago.
#[must_use]
pub fn sample_query() -> CandidateQuery {
    CandidateQuery {
        origin: Coord {
            x: -87.6298,
            y: 41.8781,
        },
        target_distance_miles: 4.0,
        shape: RouteShape::Loop,
        preferences: RecommendationPreferences::new()
            .with_target_distance(4.0)
            .with_user_location(41.8781, -87.6298),
    }
}

/// Stub [`CandidateSource`] returning a pre-configured response.
///
/// The most recent query is retained so tests can inspect what the caller
/// asked for.
#[derive(Debug)]
pub struct StubCandidateSource {
    response: Result<Vec<Route>, CandidateError>,
    last_query: RefCell<Option<CandidateQuery>>,
}

impl StubCandidateSource {
    /// Create a source that returns `routes` for every query.
    #[must_use]
    pub const fn with_routes(routes: Vec<Route>) -> Self {
        Self {
            response: Ok(routes),
            last_query: RefCell::new(None),
        }
    }

    /// Create a source that fails every query with `error`.
    #[must_use]
    pub const fn with_error(error: CandidateError) -> Self {
        Self {
            response: Err(error),
            last_query: RefCell::new(None),
        }
    }

    /// Take the most recent query, leaving `None` behind.
    #[must_use]
    pub fn take_last_query(&self) -> Option<CandidateQuery> {
        self.last_query.take()
    }
}

impl CandidateSource for StubCandidateSource {
    fn candidates(&self, query: &CandidateQuery) -> Result<Vec<Route>, CandidateError> {
        self.last_query.replace(Some(query.clone()));
        self.response.clone()
    }
}
