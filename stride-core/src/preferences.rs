//! Caller preferences steering the recommendation engine.
//!
//! [`RecommendationPreferences`] mirrors the loosely-typed JSON the HTTP
//! layer receives: every field is optional. Scoring never reads it directly;
//! [`RecommendationPreferences::resolve`] applies every default once and
//! yields a [`ResolvedPreferences`] the scorer can use without fallbacks.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::SurfaceType;

/// Tolerance applied around the target distance when none is given.
pub const DEFAULT_DISTANCE_TOLERANCE_MILES: f64 = 2.0;

/// Proximity scale used when no maximum distance is configured.
pub const DEFAULT_PROXIMITY_CAP_MILES: f64 = 10.0;

/// Fixed weight of the distance-match factor. Callers cannot override it.
pub const DISTANCE_MATCH_WEIGHT: f64 = 0.15;

/// Surface requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfacePreference {
    /// Only paved routes.
    Paved,
    /// Only trail routes.
    Trail,
    /// Only mixed-surface routes.
    Mixed,
    /// No surface restriction.
    Any,
}

impl SurfacePreference {
    /// The concrete surface this preference requires, if any.
    ///
    /// # Examples
    /// ```
    /// use stride_core::{SurfacePreference, SurfaceType};
    ///
    /// assert_eq!(SurfacePreference::Trail.required(), Some(SurfaceType::Trail));
    /// assert_eq!(SurfacePreference::Any.required(), None);
    /// ```
    #[must_use]
    pub const fn required(self) -> Option<SurfaceType> {
        match self {
            Self::Paved => Some(SurfaceType::Paved),
            Self::Trail => Some(SurfaceType::Trail),
            Self::Mixed => Some(SurfaceType::Mixed),
            Self::Any => None,
        }
    }
}

/// Optional scoring and filtering preferences supplied by the caller.
///
/// Weights are conventionally close to summing to `1.0`, but nothing
/// enforces it. Absent fields fall back to the defaults documented on
/// [`ScoringWeights`] and the module constants.
///
/// # Examples
/// ```
/// use stride_core::RecommendationPreferences;
///
/// let preferences: RecommendationPreferences =
///     serde_json::from_str(r#"{"targetDistance": 5.0, "nightMode": true}"#)?;
/// assert_eq!(preferences.target_distance, Some(5.0));
/// assert!(preferences.resolve().night_mode);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationPreferences {
    /// Desired route length in miles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_distance: Option<f64>,
    /// Acceptable deviation from the target, in miles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_tolerance: Option<f64>,
    /// Weight of the scenic factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenic_weight: Option<f64>,
    /// Weight of the safety factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_weight: Option<f64>,
    /// Weight of the lighting factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighting_weight: Option<f64>,
    /// Weight of the elevation factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_weight: Option<f64>,
    /// Weight of the popularity factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity_weight: Option<f64>,
    /// Weight of the proximity factor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity_weight: Option<f64>,
    /// Require lit routes and reward them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night_mode: Option<bool>,
    /// `true` favours climbing, `false` favours flat routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_hills: Option<bool>,
    /// Surface restriction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_surface: Option<SurfacePreference>,
    /// Latitude of the user's starting point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_lat: Option<f64>,
    /// Longitude of the user's starting point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_lng: Option<f64>,
    /// Hard cap on the distance from the user to a route start, in miles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance_miles: Option<f64>,
}

impl RecommendationPreferences {
    /// Construct preferences with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target distance while returning `self` for chaining.
    #[must_use]
    pub const fn with_target_distance(mut self, miles: f64) -> Self {
        self.target_distance = Some(miles);
        self
    }

    /// Set the distance tolerance while returning `self` for chaining.
    #[must_use]
    pub const fn with_distance_tolerance(mut self, miles: f64) -> Self {
        self.distance_tolerance = Some(miles);
        self
    }

    /// Enable or disable night mode.
    #[must_use]
    pub const fn with_night_mode(mut self, enabled: bool) -> Self {
        self.night_mode = Some(enabled);
        self
    }

    /// Favour (`true`) or avoid (`false`) climbing.
    #[must_use]
    pub const fn with_prefer_hills(mut self, prefer: bool) -> Self {
        self.prefer_hills = Some(prefer);
        self
    }

    /// Restrict results to a surface.
    #[must_use]
    pub const fn with_preferred_surface(mut self, surface: SurfacePreference) -> Self {
        self.preferred_surface = Some(surface);
        self
    }

    /// Set the user's starting location.
    ///
    /// # Examples
    /// ```
    /// use stride_core::RecommendationPreferences;
    ///
    /// let preferences = RecommendationPreferences::new().with_user_location(41.88, -87.63);
    /// let location = preferences.user_location().expect("location set");
    /// assert_eq!((location.x, location.y), (-87.63, 41.88));
    /// ```
    #[must_use]
    pub const fn with_user_location(mut self, lat: f64, lng: f64) -> Self {
        self.user_lat = Some(lat);
        self.user_lng = Some(lng);
        self
    }

    /// Cap the distance from the user to a route start.
    #[must_use]
    pub const fn with_max_distance_miles(mut self, miles: f64) -> Self {
        self.max_distance_miles = Some(miles);
        self
    }

    /// Replace every configurable weight at once.
    #[must_use]
    pub const fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.scenic_weight = Some(weights.scenic);
        self.safety_weight = Some(weights.safety);
        self.lighting_weight = Some(weights.lighting);
        self.elevation_weight = Some(weights.elevation);
        self.popularity_weight = Some(weights.popularity);
        self.proximity_weight = Some(weights.proximity);
        self
    }

    /// The user's location as a coordinate, when both halves are present.
    #[must_use]
    pub fn user_location(&self) -> Option<Coord<f64>> {
        Some(Coord {
            x: self.user_lng?,
            y: self.user_lat?,
        })
    }

    /// Apply every documented default.
    ///
    /// A `max_distance_miles` of zero (or NaN) still acts as a hard filter
    /// in the engine but is ignored as a proximity scale, which falls back to
    /// [`DEFAULT_PROXIMITY_CAP_MILES`].
    #[must_use]
    pub fn resolve(&self) -> ResolvedPreferences {
        let defaults = ScoringWeights::default();
        let weights = ScoringWeights {
            scenic: self.scenic_weight.unwrap_or(defaults.scenic),
            safety: self.safety_weight.unwrap_or(defaults.safety),
            lighting: self.lighting_weight.unwrap_or(defaults.lighting),
            elevation: self.elevation_weight.unwrap_or(defaults.elevation),
            popularity: self.popularity_weight.unwrap_or(defaults.popularity),
            proximity: self.proximity_weight.unwrap_or(defaults.proximity),
        };
        let proximity_scale = self
            .max_distance_miles
            .filter(|cap| *cap != 0.0 && !cap.is_nan())
            .unwrap_or(DEFAULT_PROXIMITY_CAP_MILES);

        ResolvedPreferences {
            weights,
            target_distance: self.target_distance,
            distance_tolerance: self
                .distance_tolerance
                .unwrap_or(DEFAULT_DISTANCE_TOLERANCE_MILES),
            night_mode: self.night_mode.unwrap_or(false),
            prefer_hills: self.prefer_hills,
            required_surface: self.preferred_surface.and_then(SurfacePreference::required),
            user_location: self.user_location(),
            max_distance_miles: self.max_distance_miles,
            proximity_scale,
        }
    }
}

/// Per-factor weights used to combine sub-scores.
///
/// # Examples
/// ```
/// use stride_core::ScoringWeights;
///
/// let weights = ScoringWeights::default();
/// assert_eq!(weights.scenic, 0.25);
/// assert_eq!(weights.proximity, 0.15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Scenic factor, default `0.25`.
    pub scenic: f64,
    /// Safety factor, default `0.25`.
    pub safety: f64,
    /// Lighting factor, default `0.15`.
    pub lighting: f64,
    /// Elevation factor, default `0.10`.
    pub elevation: f64,
    /// Popularity factor, default `0.10`.
    pub popularity: f64,
    /// Proximity factor, default `0.15`.
    pub proximity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            scenic: 0.25,
            safety: 0.25,
            lighting: 0.15,
            elevation: 0.10,
            popularity: 0.10,
            proximity: 0.15,
        }
    }
}

/// Preferences with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPreferences {
    /// Factor weights.
    pub weights: ScoringWeights,
    /// Desired route length in miles, if any.
    pub target_distance: Option<f64>,
    /// Acceptable deviation from the target, in miles.
    pub distance_tolerance: f64,
    /// Whether night mode is on.
    pub night_mode: bool,
    /// Climbing preference; `None` is neutral.
    pub prefer_hills: Option<bool>,
    /// Surface every result must have, if restricted.
    pub required_surface: Option<SurfaceType>,
    /// User location (`x = longitude`, `y = latitude`).
    pub user_location: Option<Coord<f64>>,
    /// Hard cap on distance to a route start.
    pub max_distance_miles: Option<f64>,
    /// Distance at which proximity scoring reaches its floor of `0.5`.
    pub proximity_scale: f64,
}
