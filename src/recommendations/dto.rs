use serde::{Deserialize, Serialize};

use super::model::FeedbackCounts;

#[derive(Debug, Deserialize)]
pub struct CountParam {
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RecommendationStats {
    pub total: i64,
    pub clicked: i64,
    pub ordered: i64,
    pub click_rate: f64,
    pub conversion_rate: f64,
    /// Mean of the five match factors over the whole history.
    pub average_match: f64,
}

impl RecommendationStats {
    pub fn new(counts: FeedbackCounts, average_match: f64) -> Self {
        Self {
            total: counts.total,
            clicked: counts.clicked,
            ordered: counts.ordered,
            click_rate: counts.click_rate(),
            conversion_rate: counts.conversion_rate(),
            average_match,
        }
    }
}
