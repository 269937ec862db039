use super::model::Recommendation;

/// Orders by score, highest first, and keeps at most `count` entries.
/// The sort is stable, so equal scores keep their incoming order.
pub fn rank(mut scored: Vec<Recommendation>, count: usize) -> Vec<Recommendation> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(count);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendations::model::SubScores;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn rec(name: &str, score: f64) -> Recommendation {
        Recommendation {
            id: Uuid::new_v4(),
            profile_id: Uuid::nil(),
            item_id: Uuid::new_v4(),
            item_name: name.into(),
            sub_scores: SubScores {
                cuisine_match: 0.5,
                flavor_match: 0.5,
                ingredient_match: 0.5,
                health_match: 0.5,
                nutrition_match: 0.5,
            },
            score,
            reason: String::new(),
            recommended_at: OffsetDateTime::UNIX_EPOCH,
            clicked: false,
            ordered: false,
            user_rating: None,
            user_feedback: None,
        }
    }

    fn names(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.item_name.as_str()).collect()
    }

    #[test]
    fn sorts_descending_and_keeps_tie_order() {
        let input = vec![
            rec("a", 50.0),
            rec("b", 70.0),
            rec("c", 50.0),
            rec("d", 90.0),
            rec("e", 50.0),
        ];
        let ranked = rank(input, 10);
        assert_eq!(names(&ranked), vec!["d", "b", "a", "c", "e"]);
    }

    #[test]
    fn truncates_to_count() {
        let input = vec![rec("a", 10.0), rec("b", 20.0), rec("c", 30.0)];
        assert_eq!(names(&rank(input.clone(), 2)), vec!["c", "b"]);
        assert!(rank(input.clone(), 0).is_empty());
        assert_eq!(rank(input, 99).len(), 3);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert!(rank(Vec::new(), 10).is_empty());
    }
}
