//! Great-circle distance between coordinates.

use geo::Coord;

/// Mean Earth radius used for mileage calculations.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance in miles between two WGS84 coordinates.
///
/// Coordinates follow the crate convention of `x = longitude` and
/// `y = latitude`, in degrees. Inputs are not validated: out-of-range values
/// produce a meaningless number rather than a panic.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stride_core::haversine_miles;
///
/// let chicago = Coord { x: -87.6298, y: 41.8781 };
/// assert_eq!(haversine_miles(chicago, chicago), 0.0);
///
/// let north = Coord { x: -87.6298, y: 41.8881 };
/// assert!((haversine_miles(chicago, north) - 0.69).abs() < 0.05);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
#[must_use]
pub fn haversine_miles(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let d_lat = (to.y - from.y).to_radians();
    let d_lng = (to.x - from.x).to_radians();
    let half_lat = (d_lat / 2.0).sin();
    let half_lng = (d_lng / 2.0).sin();
    let a = half_lat * half_lat
        + from.y.to_radians().cos() * to.y.to_radians().cos() * half_lng * half_lng;
    let central_angle = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * central_angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const CHICAGO: Coord<f64> = Coord {
        x: -87.6298,
        y: 41.8781,
    };

    #[rstest]
    fn identical_points_are_zero_miles_apart() {
        assert_eq!(haversine_miles(CHICAGO, CHICAGO), 0.0);
    }

    #[rstest]
    #[case(CHICAGO, Coord { x: -87.6298, y: 41.8881 }, 0.69, 0.05)]
    // One degree of longitude on the equator.
    #[case(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }, 69.09, 0.05)]
    fn known_distances(
        #[case] from: Coord<f64>,
        #[case] to: Coord<f64>,
        #[case] expected: f64,
        #[case] tolerance: f64,
    ) {
        let miles = haversine_miles(from, to);
        assert!(
            (miles - expected).abs() <= tolerance,
            "expected ~{expected} miles, got {miles}"
        );
    }

    #[rstest]
    fn distance_is_symmetric() {
        let other = Coord {
            x: -87.9073,
            y: 41.9742,
        };
        let there = haversine_miles(CHICAGO, other);
        let back = haversine_miles(other, CHICAGO);
        assert!((there - back).abs() < 1e-9);
    }

    #[rstest]
    fn out_of_range_input_does_not_panic() {
        let wild = Coord {
            x: 540.0,
            y: -200.0,
        };
        let _ = haversine_miles(CHICAGO, wild);
    }
}
