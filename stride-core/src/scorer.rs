//! Multi-factor scoring of a single route.
//!
//! Each factor produces a sub-score in `0.0..=1.0`. The total is the weighted
//! sum of the sub-scores plus a flat surface bonus, scaled to `0..=100` and
//! capped at `100`. There is deliberately no lower clamp: weights that sum
//! below the nominal total simply yield lower scores.

use serde::{Deserialize, Serialize};

use crate::preferences::{DISTANCE_MATCH_WEIGHT, ResolvedPreferences, ScoringWeights};
use crate::Route;

const SURFACE_MATCH_BONUS: f64 = 0.1;
const ELEVATION_SATURATION_FEET: f64 = 200.0;
const NEUTRAL_SCORE: f64 = 0.5;

/// Per-factor sub-scores, each scaled to `0..=100` before weighting.
///
/// The breakdown explains a score; it is never used to recompute one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Scenic quality.
    pub scenic: f64,
    /// Perceived safety.
    pub safety: f64,
    /// Lighting suitability.
    pub lighting: f64,
    /// Match to the climbing preference.
    pub elevation: f64,
    /// Popularity.
    pub popularity: f64,
    /// Match to the target distance.
    pub distance: f64,
    /// Closeness of the route start to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity: Option<f64>,
}

/// A route together with its recommendation score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRoute {
    /// The scored route.
    #[serde(flatten)]
    pub route: Route,
    /// Weighted total in `0..=100`.
    pub score: f64,
    /// Unweighted sub-scores.
    pub score_breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Copy)]
struct SubScores {
    scenic: f64,
    safety: f64,
    lighting: f64,
    elevation: f64,
    popularity: f64,
    distance: f64,
    proximity: f64,
}

impl SubScores {
    #[expect(
        clippy::float_arithmetic,
        reason = "combining sub-scores is a weighted sum"
    )]
    fn weighted_sum(self, weights: ScoringWeights) -> f64 {
        self.scenic * weights.scenic
            + self.safety * weights.safety
            + self.lighting * weights.lighting
            + self.elevation * weights.elevation
            + self.popularity * weights.popularity
            + self.proximity * weights.proximity
            + self.distance * DISTANCE_MATCH_WEIGHT
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "breakdown values are percentages"
    )]
    fn into_breakdown(self) -> ScoreBreakdown {
        ScoreBreakdown {
            scenic: self.scenic * 100.0,
            safety: self.safety * 100.0,
            lighting: self.lighting * 100.0,
            elevation: self.elevation * 100.0,
            popularity: self.popularity * 100.0,
            distance: self.distance * 100.0,
            proximity: Some(self.proximity * 100.0),
        }
    }
}

/// Score a route against resolved preferences.
///
/// `proximity_miles` is the precomputed distance from the user to the route
/// start; `None` means no location signal and yields a neutral proximity.
///
/// # Examples
/// ```
/// use stride_core::{RecommendationPreferences, Route, score_route};
///
/// let route: Route = serde_json::from_value(serde_json::json!({
///     "id": "r1", "name": "Lakefront", "distance": 4.0, "elevationGain": 50.0,
///     "surfaceType": "paved", "routeShape": "loop", "hasLighting": true,
///     "safetyScore": 75.0, "scenicScore": 75.0, "popularity": 70.0, "weatherComfort": 80.0,
///     "geojson": {"type": "LineString", "coordinates": [[-87.6298, 41.8781]]},
/// }))
/// .expect("valid route JSON");
/// let preferences = RecommendationPreferences::new().with_target_distance(4.0).resolve();
///
/// let scored = score_route(&route, &preferences, None);
/// assert_eq!(scored.score_breakdown.distance, 100.0);
/// assert!(scored.score <= 100.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "the total is a scaled weighted sum"
)]
#[must_use]
pub fn score_route(
    route: &Route,
    preferences: &ResolvedPreferences,
    proximity_miles: Option<f64>,
) -> ScoredRoute {
    let sub_scores = SubScores {
        scenic: percentage(route.scenic_score),
        safety: percentage(route.safety_score),
        lighting: lighting_score(route.has_lighting, preferences.night_mode),
        elevation: elevation_score(route.elevation_gain, preferences.prefer_hills),
        popularity: percentage(route.popularity),
        distance: distance_match_score(
            route.distance,
            preferences.target_distance,
            preferences.distance_tolerance,
        ),
        proximity: proximity_miles.map_or(NEUTRAL_SCORE, |miles| {
            proximity_score(miles, preferences.proximity_scale)
        }),
    };

    let combined = sub_scores.weighted_sum(preferences.weights) + surface_bonus(route, preferences);

    ScoredRoute {
        route: route.clone(),
        score: (combined * 100.0).min(100.0),
        score_breakdown: sub_scores.into_breakdown(),
    }
}

#[expect(clippy::float_arithmetic, reason = "rescales 0..=100 to 0..=1")]
fn percentage(value: f64) -> f64 {
    value / 100.0
}

/// Lit routes are never penalised; unlit ones only in night mode.
const fn lighting_score(has_lighting: bool, night_mode: bool) -> f64 {
    match (night_mode, has_lighting) {
        (true, true) => 1.0,
        (true, false) => 0.2,
        (false, true) => 0.7,
        (false, false) => 0.5,
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "elevation is normalised against a fixed saturation point"
)]
fn elevation_score(elevation_gain: f64, prefer_hills: Option<bool>) -> f64 {
    let normalised = (elevation_gain / ELEVATION_SATURATION_FEET).min(1.0);
    match prefer_hills {
        None => NEUTRAL_SCORE,
        Some(true) => normalised,
        Some(false) => 1.0 - normalised,
    }
}

/// Within tolerance the score eases from `1.0` to `0.5`; beyond it the score
/// falls linearly to zero at twice the tolerance.
///
/// A non-positive tolerance only rewards an exact match.
#[expect(
    clippy::float_arithmetic,
    reason = "distance matching is a piecewise linear falloff"
)]
fn distance_match_score(distance: f64, target: Option<f64>, tolerance: f64) -> f64 {
    let Some(target_miles) = target else {
        return 1.0;
    };
    let diff = (distance - target_miles).abs();
    if tolerance <= 0.0 || tolerance.is_nan() {
        return if diff == 0.0 { 1.0 } else { 0.0 };
    }
    if diff <= tolerance {
        1.0 - (diff / tolerance) * 0.5
    } else {
        (1.0 - (diff - tolerance) / tolerance).max(0.0)
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "proximity is a linear falloff over the configured scale"
)]
fn proximity_score(miles: f64, scale: f64) -> f64 {
    if miles <= scale {
        1.0 - (miles / scale) * 0.5
    } else {
        0.0
    }
}

fn surface_bonus(route: &Route, preferences: &ResolvedPreferences) -> f64 {
    match preferences.required_surface {
        Some(surface) if surface == route.surface_type => SURFACE_MATCH_BONUS,
        _ => 0.0,
    }
}
