//! TrailRouter response types.
//!
//! Only the fields Stride reads are modelled; everything else in the payload
//! is ignored.

use geo::Coord;
use serde::Deserialize;

/// Top-level TrailRouter answer.
#[derive(Debug, Deserialize)]
pub(super) struct RoutesResponse {
    #[serde(default)]
    pub routes: Vec<RoutePayload>,
}

/// One generated route.
#[derive(Debug, Deserialize)]
pub(super) struct RoutePayload {
    /// Length in metres.
    pub distance: Option<f64>,
    /// Total climb in metres.
    pub ascent: Option<f64>,
    pub geometry: Option<GeometryPayload>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GeometryPayload {
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

impl RoutesResponse {
    pub(super) fn into_first_route(self) -> Option<RoutePayload> {
        self.routes.into_iter().next()
    }
}

impl RoutePayload {
    /// `[lng, lat]` or `[lng, lat, elevation]` positions as 2D coordinates.
    ///
    /// Positions with fewer than two ordinates are skipped.
    pub(super) fn coordinates(&self) -> Vec<Coord<f64>> {
        self.geometry
            .iter()
            .flat_map(|geometry| geometry.coordinates.iter())
            .filter_map(|position| match position.as_slice() {
                [lng, lat, ..] => Some(Coord { x: *lng, y: *lat }),
                _ => None,
            })
            .collect()
    }
}
