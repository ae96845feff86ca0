//! Ranking of scored places
//!
//! Pure functions: each takes the matches by value and returns a new,
//! ordered sequence.

use crate::constants::nearby::TOP_RATED_LIMIT;
use crate::nearby::{RankingMode, ScoredPlace};
use std::cmp::Ordering;

/// Order matches according to `mode`
pub fn rank(matches: Vec<ScoredPlace>, mode: RankingMode) -> Vec<ScoredPlace> {
    match mode {
        RankingMode::NearestFirst => nearest_first(matches),
        RankingMode::TopRated => top_rated(matches, TOP_RATED_LIMIT),
    }
}

/// Ascending distance; equal distances keep catalog order
pub fn nearest_first(mut matches: Vec<ScoredPlace>) -> Vec<ScoredPlace> {
    matches.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    matches
}

/// Descending rating, truncated to `limit`; equal ratings keep catalog order
pub fn top_rated(mut matches: Vec<ScoredPlace>, limit: usize) -> Vec<ScoredPlace> {
    // `sort_by` is stable
    matches.sort_by(|a, b| by_rating_desc(a.place.rating, b.place.rating));
    matches.truncate(limit);
    matches
}

/// NaN ratings sort after every real rating
fn by_rating_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Place;

    fn scored(id: u64, rating: f64, distance_km: f64) -> ScoredPlace {
        ScoredPlace {
            place: Place::new(id, format!("p{}", id), rating),
            distance_km,
        }
    }

    fn ids(matches: &[ScoredPlace]) -> Vec<u64> {
        matches.iter().map(|m| m.place.id).collect()
    }

    #[test]
    fn test_nearest_first_order() {
        let ranked = nearest_first(vec![scored(1, 0.0, 3.2), scored(2, 0.0, 0.4), scored(3, 0.0, 1.9)]);
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn test_nearest_first_keeps_all() {
        let input: Vec<ScoredPlace> = (0..40).map(|i| scored(i, 1.0, (40 - i) as f64 * 0.1)).collect();
        assert_eq!(nearest_first(input).len(), 40);
    }

    #[test]
    fn test_top_rated_stable_on_ties() {
        let ranked = top_rated(
            vec![
                scored(1, 4.0, 1.0),
                scored(2, 5.0, 2.0),
                scored(3, 4.0, 0.5),
                scored(4, 4.0, 0.1),
            ],
            10,
        );
        assert_eq!(ids(&ranked), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_top_rated_truncates() {
        let input: Vec<ScoredPlace> = (0..15).map(|i| scored(i, i as f64, 1.0)).collect();
        let ranked = top_rated(input, 10);

        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].place.id, 14);
        assert_eq!(ranked[9].place.id, 5);
    }

    #[test]
    fn test_top_rated_nan_last() {
        let ranked = top_rated(vec![scored(1, f64::NAN, 1.0), scored(2, -1.0, 1.0), scored(3, 2.0, 1.0)], 10);
        assert_eq!(ids(&ranked), vec![3, 2, 1]);
    }

    #[test]
    fn test_rank_dispatch() {
        let input = vec![scored(1, 1.0, 0.5), scored(2, 5.0, 4.5)];

        assert_eq!(ids(&rank(input.clone(), RankingMode::NearestFirst)), vec![1, 2]);
        assert_eq!(ids(&rank(input, RankingMode::TopRated)), vec![2, 1]);
    }
}
