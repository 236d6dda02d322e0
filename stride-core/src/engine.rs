//! Filter, score and rank candidate routes.

use crate::scorer::{ScoredRoute, score_route};
use crate::{RecommendationPreferences, ResolvedPreferences, Route, haversine_miles};

/// Where a candidate sits relative to the user's location.
enum Placement {
    /// Start lies beyond the configured cap.
    OutOfRange,
    /// Kept, with the distance to its start when one could be computed.
    InRange(Option<f64>),
}

/// Return the best `limit` routes for `preferences`, highest score first.
///
/// Filtering happens before scoring:
/// 1. a specific preferred surface drops non-matching routes;
/// 2. night mode drops unlit routes;
/// 3. with a user location and `max_distance_miles`, routes whose start is
///    farther than the cap are dropped.
///
/// Routes without geometry carry no proximity signal and are never dropped
/// by the distance cap. Ties keep their candidate order. The input slice is
/// only read; the result is freshly allocated and never padded.
///
/// # Examples
/// ```
/// use stride_core::{RecommendationPreferences, recommend};
///
/// let ranked = recommend(&[], &RecommendationPreferences::new(), 5);
/// assert!(ranked.is_empty());
/// ```
#[must_use]
pub fn recommend(
    routes: &[Route],
    preferences: &RecommendationPreferences,
    limit: usize,
) -> Vec<ScoredRoute> {
    let resolved = preferences.resolve();

    let mut scored: Vec<ScoredRoute> = routes
        .iter()
        .filter(|route| matches_surface(route, &resolved))
        .filter(|route| satisfies_lighting(route, &resolved))
        .filter_map(|route| match place(route, &resolved) {
            Placement::OutOfRange => None,
            Placement::InRange(proximity) => Some(score_route(route, &resolved, proximity)),
        })
        .collect();

    log::debug!(
        "{} of {} candidate routes survived filtering",
        scored.len(),
        routes.len()
    );

    // Stable sort: equal scores keep candidate order.
    scored.sort_by(|lhs, rhs| rhs.score.total_cmp(&lhs.score));
    scored.truncate(limit);
    scored
}

fn matches_surface(route: &Route, preferences: &ResolvedPreferences) -> bool {
    preferences
        .required_surface
        .is_none_or(|surface| surface == route.surface_type)
}

fn satisfies_lighting(route: &Route, preferences: &ResolvedPreferences) -> bool {
    !preferences.night_mode || route.has_lighting
}

fn place(route: &Route, preferences: &ResolvedPreferences) -> Placement {
    let (Some(user), Some(start)) = (preferences.user_location, route.start()) else {
        return Placement::InRange(None);
    };
    let miles = haversine_miles(user, start);
    match preferences.max_distance_miles {
        Some(cap) if miles > cap => Placement::OutOfRange,
        _ => Placement::InRange(Some(miles)),
    }
}
