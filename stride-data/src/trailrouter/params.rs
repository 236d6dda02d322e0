//! Query-string construction for TrailRouter requests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stride_core::{CandidateQuery, RouteShape};
use url::Url;

/// Metres in a statute mile.
pub(super) const METRES_PER_MILE: f64 = 1609.34;

/// Feet in a metre.
pub(super) const FEET_PER_METRE: f64 = 3.28084;

const DEFAULT_GREEN_PREFERENCE: f64 = 0.3;
const DEFAULT_SAFETY_WEIGHT: f64 = 0.3;
const UNSAFE_STREET_THRESHOLD: f64 = 0.5;
const HILLS_PREFERENCE: f64 = 0.7;
const MIN_DISTANCE_FACTOR: f64 = 0.85;
const MAX_DISTANCE_FACTOR: f64 = 1.15;

/// Per-candidate multipliers for the target distance.
///
/// A fixed seed yields the same factors on every call.
pub(super) fn distance_factors(count: usize, seed: Option<u64>) -> Vec<f64> {
    let mut rng = seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    (0..count)
        .map(|_| rng.gen_range(MIN_DISTANCE_FACTOR..=MAX_DISTANCE_FACTOR))
        .collect()
}

/// Query parameters for one candidate request.
#[expect(
    clippy::float_arithmetic,
    reason = "target distance is scaled to metres and varied per candidate"
)]
pub(super) fn query_pairs(query: &CandidateQuery, distance_factor: f64) -> Vec<(&'static str, String)> {
    let preferences = &query.preferences;
    let target_metres = query.target_distance_miles * METRES_PER_MILE * distance_factor;
    let green = preferences
        .scenic_weight
        .unwrap_or(DEFAULT_GREEN_PREFERENCE);
    let hills = match preferences.prefer_hills {
        Some(true) => HILLS_PREFERENCE,
        Some(false) => -HILLS_PREFERENCE,
        None => 0.0,
    };
    let avoid_unlit = preferences.night_mode.unwrap_or(false);
    let avoid_unsafe =
        preferences.safety_weight.unwrap_or(DEFAULT_SAFETY_WEIGHT) > UNSAFE_STREET_THRESHOLD;

    vec![
        ("coordinates", format!("{},{}", query.origin.x, query.origin.y)),
        ("roundtrip", (query.shape == RouteShape::Loop).to_string()),
        ("target_distance", format!("{target_metres:.0}")),
        ("green_preference", format!("{green:.2}")),
        ("hills_preference", format!("{hills:.2}")),
        ("avoid_unlit_streets", avoid_unlit.to_string()),
        ("avoid_unsafe_streets", avoid_unsafe.to_string()),
        ("avoid_repetition", "true".to_owned()),
    ]
}

/// The base URL with the candidate's query string appended.
pub(super) fn candidate_url(base: &Url, query: &CandidateQuery, distance_factor: f64) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .extend_pairs(query_pairs(query, distance_factor));
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;
    use stride_core::test_support::sample_query;

    fn pairs_map(query: &CandidateQuery, factor: f64) -> HashMap<&'static str, String> {
        query_pairs(query, factor).into_iter().collect()
    }

    #[rstest]
    fn default_preferences_map_to_neutral_parameters() {
        let params = pairs_map(&sample_query(), 1.0);

        assert_eq!(params["coordinates"], "-87.6298,41.8781");
        assert_eq!(params["roundtrip"], "true");
        assert_eq!(params["target_distance"], "6437");
        assert_eq!(params["green_preference"], "0.30");
        assert_eq!(params["hills_preference"], "0.00");
        assert_eq!(params["avoid_unlit_streets"], "false");
        assert_eq!(params["avoid_unsafe_streets"], "false");
        assert_eq!(params["avoid_repetition"], "true");
    }

    #[rstest]
    #[case(Some(true), "0.70")]
    #[case(Some(false), "-0.70")]
    #[case(None, "0.00")]
    fn hill_preference_maps_to_signed_bias(#[case] prefer: Option<bool>, #[case] expected: &str) {
        let mut query = sample_query();
        query.preferences.prefer_hills = prefer;
        assert_eq!(pairs_map(&query, 1.0)["hills_preference"], expected);
    }

    #[rstest]
    fn preferences_steer_street_avoidance() {
        let mut query = sample_query();
        query.shape = RouteShape::OutAndBack;
        query.preferences.night_mode = Some(true);
        query.preferences.safety_weight = Some(0.6);
        query.preferences.scenic_weight = Some(0.456);

        let params = pairs_map(&query, 1.0);

        assert_eq!(params["roundtrip"], "false");
        assert_eq!(params["avoid_unlit_streets"], "true");
        assert_eq!(params["avoid_unsafe_streets"], "true");
        assert_eq!(params["green_preference"], "0.46");
    }

    #[rstest]
    fn distance_factor_scales_target() {
        assert_eq!(pairs_map(&sample_query(), 1.15)["target_distance"], "7403");
    }

    #[rstest]
    fn seeded_factors_are_deterministic_and_bounded() {
        let first = distance_factors(6, Some(42));
        let second = distance_factors(6, Some(42));

        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
        assert!(
            first
                .iter()
                .all(|factor| (MIN_DISTANCE_FACTOR..=MAX_DISTANCE_FACTOR).contains(factor))
        );
    }

    #[rstest]
    fn url_keeps_base_path_and_appends_query() {
        let base = Url::parse("https://trailrouter.com/ors/experimentalroutes").expect("valid URL");

        let url = candidate_url(&base, &sample_query(), 1.0);

        assert_eq!(url.path(), "/ors/experimentalroutes");
        assert!(
            url.as_str()
                .starts_with("https://trailrouter.com/ors/experimentalroutes?coordinates=-87.6298%2C41.8781&roundtrip=true")
        );
    }
}
