//! Candidate running routes.
//!
//! A [`Route`] is produced once by a candidate source (or loaded from a
//! catalogue) and is only ever read afterwards. Geometry is stored as
//! [`geo::Coord`] values with `x = longitude` and `y = latitude`, and travels
//! over the wire in GeoJSON `LineString` form.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Terrain classification of a route.
///
/// # Examples
/// ```
/// use stride_core::SurfaceType;
///
/// assert_eq!(SurfaceType::Trail.as_str(), "trail");
/// assert_eq!(SurfaceType::Mixed.to_string(), "mixed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceType {
    /// Roads, pavements and tarmac paths.
    Paved,
    /// Unsurfaced trails.
    Trail,
    /// A mixture of paved and unpaved sections.
    Mixed,
}

impl SurfaceType {
    /// Return the surface as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paved => "paved",
            Self::Trail => "trail",
            Self::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall shape of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteShape {
    /// Starts and finishes at the same point without retracing.
    Loop,
    /// Starts and finishes at different points.
    PointToPoint,
    /// Runs out to a turnaround and returns along the same path.
    OutAndBack,
}

impl RouteShape {
    /// Return the shape in its kebab-case wire form.
    ///
    /// # Examples
    /// ```
    /// use stride_core::RouteShape;
    ///
    /// assert_eq!(RouteShape::OutAndBack.as_str(), "out-and-back");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::PointToPoint => "point-to-point",
            Self::OutAndBack => "out-and-back",
        }
    }
}

impl std::fmt::Display for RouteShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered path of a route.
///
/// Serialises as `{"type": "LineString", "coordinates": [[lng, lat], ...]}`.
///
/// # Examples
/// ```
/// use stride_core::RouteGeometry;
///
/// let geometry = RouteGeometry::from_lon_lat([(-87.63, 41.88), (-87.62, 41.89)]);
/// assert_eq!(geometry.len(), 2);
/// assert_eq!(geometry.first().map(|c| c.y), Some(41.88));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "LineStringWire", into = "LineStringWire")]
pub struct RouteGeometry {
    coordinates: Vec<Coord<f64>>,
}

impl RouteGeometry {
    /// Wrap an ordered list of coordinates.
    #[must_use]
    pub const fn new(coordinates: Vec<Coord<f64>>) -> Self {
        Self { coordinates }
    }

    /// Build a geometry from `(longitude, latitude)` pairs.
    pub fn from_lon_lat<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(points.into_iter().map(|(x, y)| Coord { x, y }).collect())
    }

    /// Borrow the coordinates in path order.
    #[must_use]
    pub fn coords(&self) -> &[Coord<f64>] {
        &self.coordinates
    }

    /// Return the first coordinate, if any.
    #[must_use]
    pub fn first(&self) -> Option<Coord<f64>> {
        self.coordinates.first().copied()
    }

    /// Number of points in the path.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the path has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
enum GeometryKind {
    LineString,
}

#[derive(Serialize, Deserialize)]
struct LineStringWire {
    #[serde(rename = "type")]
    kind: GeometryKind,
    coordinates: Vec<[f64; 2]>,
}

impl From<LineStringWire> for RouteGeometry {
    fn from(wire: LineStringWire) -> Self {
        Self::new(
            wire.coordinates
                .into_iter()
                .map(|[x, y]| Coord { x, y })
                .collect(),
        )
    }
}

impl From<RouteGeometry> for LineStringWire {
    fn from(geometry: RouteGeometry) -> Self {
        Self {
            kind: GeometryKind::LineString,
            coordinates: geometry
                .coordinates
                .into_iter()
                .map(|coord| [coord.x, coord.y])
                .collect(),
        }
    }
}

/// A runnable path offered to the user.
///
/// Distances are in miles and elevation gain in feet. The quality
/// attributes (`safety_score`, `scenic_score`, `popularity`,
/// `weather_comfort`) are on a `0..=100` scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Opaque identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Length of the route in miles.
    pub distance: f64,
    /// Total climb in feet.
    pub elevation_gain: f64,
    /// Terrain classification.
    pub surface_type: SurfaceType,
    /// Overall shape.
    pub route_shape: RouteShape,
    /// Whether the route is street-lit.
    pub has_lighting: bool,
    /// Perceived safety, `0..=100`.
    pub safety_score: f64,
    /// Scenic quality, `0..=100`.
    pub scenic_score: f64,
    /// Popularity among runners, `0..=100`.
    pub popularity: f64,
    /// Weather comfort, `0..=100`.
    pub weather_comfort: f64,
    /// Path geometry; the first point is the start.
    #[serde(rename = "geojson")]
    pub geometry: RouteGeometry,
}

impl Route {
    /// Return the route's starting coordinate.
    ///
    /// `None` signals an empty geometry; callers treat that as "no location
    /// signal" rather than an error.
    ///
    /// # Examples
    /// ```
    /// use stride_core::{Route, RouteGeometry};
    ///
    /// let mut route: Route = serde_json::from_value(serde_json::json!({
    ///     "id": "r1", "name": "Thames Path", "distance": 3.0, "elevationGain": 20.0,
    ///     "surfaceType": "paved", "routeShape": "out-and-back", "hasLighting": true,
    ///     "safetyScore": 80.0, "scenicScore": 85.0, "popularity": 60.0, "weatherComfort": 70.0,
    ///     "geojson": {"type": "LineString", "coordinates": [[-0.1, 51.5], [-0.2, 51.6]]},
    /// }))
    /// .expect("valid route JSON");
    /// let start = route.start().expect("route has a start");
    /// assert_eq!((start.x, start.y), (-0.1, 51.5));
    ///
    /// route.geometry = RouteGeometry::default();
    /// assert!(route.start().is_none());
    /// ```
    #[must_use]
    pub fn start(&self) -> Option<Coord<f64>> {
        self.geometry.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RouteBuilder;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(RouteShape::Loop, "\"loop\"")]
    #[case(RouteShape::PointToPoint, "\"point-to-point\"")]
    #[case(RouteShape::OutAndBack, "\"out-and-back\"")]
    fn route_shape_uses_kebab_case(#[case] shape: RouteShape, #[case] expected: &str) {
        let encoded = serde_json::to_string(&shape).expect("serialise shape");
        assert_eq!(encoded, expected);
        assert_eq!(shape.to_string(), expected.trim_matches('"'));
    }

    #[rstest]
    fn geometry_uses_geojson_line_string() {
        let geometry = RouteGeometry::from_lon_lat([(-87.6298, 41.8781), (-87.6, 41.9)]);
        let encoded = serde_json::to_value(&geometry).expect("serialise geometry");
        assert_eq!(
            encoded,
            json!({ "type": "LineString", "coordinates": [[-87.6298, 41.8781], [-87.6, 41.9]] })
        );
    }

    #[rstest]
    fn geometry_rejects_other_kinds() {
        let payload = json!({ "type": "Polygon", "coordinates": [[0.0, 0.0]] });
        let result = serde_json::from_value::<RouteGeometry>(payload);
        assert!(result.is_err());
    }

    #[rstest]
    fn route_decodes_camel_case_payload() {
        let payload = json!({
            "id": "lakefront",
            "name": "Lakefront Trail",
            "distance": 4.2,
            "elevationGain": 35.0,
            "surfaceType": "paved",
            "routeShape": "out-and-back",
            "hasLighting": true,
            "safetyScore": 88,
            "scenicScore": 95,
            "popularity": 90,
            "weatherComfort": 70,
            "geojson": { "type": "LineString", "coordinates": [[-87.6, 41.9]] }
        });

        let route: Route = serde_json::from_value(payload).expect("decode route");

        assert_eq!(route.surface_type, SurfaceType::Paved);
        assert_eq!(route.route_shape, RouteShape::OutAndBack);
        assert!(route.description.is_none());
        assert_eq!(route.start(), Some(Coord { x: -87.6, y: 41.9 }));
    }

    #[rstest]
    fn start_is_first_point_in_path_order() {
        let route = RouteBuilder::new("ordered")
            .geometry(RouteGeometry::from_lon_lat([(1.0, 2.0), (3.0, 4.0)]))
            .build();
        assert_eq!(route.start(), Some(Coord { x: 1.0, y: 2.0 }));
    }
}
