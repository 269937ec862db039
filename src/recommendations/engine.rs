use time::OffsetDateTime;
use tracing::debug;

use crate::items::model::Item;
use crate::profiles::model::Profile;

use super::filter::filter_items;
use super::model::{Preferences, Recommendation, RecommendationQuery};
use super::ranking::rank;
use super::scoring::score_item;

/// Filter, score and rank `candidates` for `profile`. Pure; no I/O.
pub fn recommend(
    profile: &Profile,
    candidates: &[Item],
    query: &RecommendationQuery,
    now: OffsetDateTime,
) -> Vec<Recommendation> {
    let prefs = Preferences::merge(profile, query);
    let eligible = filter_items(candidates, profile, query, &prefs);
    debug!(
        profile_id = %profile.id,
        candidates = candidates.len(),
        eligible = eligible.len(),
        "eligibility filter applied"
    );

    let scored = eligible
        .into_iter()
        .map(|item| score_item(item, profile, &prefs, now))
        .collect();
    rank(scored, query.count())
}
