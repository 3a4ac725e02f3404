use siftmatch_core::FeatureMatch;

use crate::distance::DistanceMatrix;

/// Squared norm of a quantized unit descriptor.
const DIST_NORM: f32 = 512.0 * 512.0;

/// Per-row result of a one-directional nearest neighbor search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OneWayMatches {
    /// For each row, the accepted column, or `None`.
    pub matches: Vec<Option<usize>>,
    /// Number of accepted rows.
    pub num_matches: usize,
}

/// Convert an integer similarity to an angular distance in radians.
#[inline]
pub fn similarity_to_angle(similarity: i32) -> f32 {
    (similarity as f32 / DIST_NORM).clamp(-1.0, 1.0).acos()
}

/// Find the best column of each row of `distances`.
///
/// A row is matched to its column of highest similarity if
/// - its angular distance is at most `max_distance`, and
/// - it is strictly below `max_ratio` times the angular distance of the
///   second best column. Exact ties are therefore rejected.
///
/// Rows without any positive similarity stay unmatched.
pub fn find_best_matches_one_way(
    distances: &DistanceMatrix,
    max_ratio: f32,
    max_distance: f32,
) -> OneWayMatches {
    let mut matches = vec![None; distances.rows()];
    let mut num_matches = 0;

    for (i1, slot) in matches.iter_mut().enumerate() {
        let mut best_i2 = None;
        let mut best_dist = 0;
        let mut second_best_dist = 0;
        for (i2, &dist) in distances.row(i1).iter().enumerate() {
            if dist > best_dist {
                best_i2 = Some(i2);
                second_best_dist = best_dist;
                best_dist = dist;
            } else if dist > second_best_dist {
                second_best_dist = dist;
            }
        }

        let Some(best_i2) = best_i2 else {
            continue;
        };

        let best_dist_normed = similarity_to_angle(best_dist);
        let second_best_dist_normed = similarity_to_angle(second_best_dist);

        if best_dist_normed > max_distance {
            continue;
        }

        if best_dist_normed >= max_ratio * second_best_dist_normed {
            continue;
        }

        num_matches += 1;
        *slot = Some(best_i2);
    }

    OneWayMatches {
        matches,
        num_matches,
    }
}

/// Match the rows of `distances` against its columns.
///
/// With `cross_check`, the matcher also runs on the transposed matrix and only
/// pairs that select each other in both directions are kept. Matches are
/// ordered by `idx1`.
pub fn find_best_matches(
    distances: &DistanceMatrix,
    max_ratio: f32,
    max_distance: f32,
    cross_check: bool,
) -> Vec<FeatureMatch> {
    let forward = find_best_matches_one_way(distances, max_ratio, max_distance);

    let matches: Vec<FeatureMatch> = if cross_check {
        let backward = find_best_matches_one_way(&distances.transpose(), max_ratio, max_distance);
        forward
            .matches
            .iter()
            .enumerate()
            .filter_map(|(i1, m)| {
                let i2 = (*m)?;
                (backward.matches[i2] == Some(i1)).then_some(FeatureMatch::new(i1, i2))
            })
            .collect()
    } else {
        forward
            .matches
            .iter()
            .enumerate()
            .filter_map(|(i1, m)| m.map(|i2| FeatureMatch::new(i1, i2)))
            .collect()
    };

    log::trace!(
        "matched {}x{} features: {} one-way, {} kept (cross_check: {})",
        distances.rows(),
        distances.cols(),
        forward.num_matches,
        matches.len(),
        cross_check
    );

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const FULL: i32 = 512 * 512;

    fn matrix(rows: usize, cols: usize, data: &[i32]) -> DistanceMatrix {
        DistanceMatrix::from_vec(rows, cols, data.to_vec()).unwrap()
    }

    #[test]
    fn test_similarity_to_angle() {
        assert_eq!(similarity_to_angle(FULL), 0.0);
        // rounding above 512² must not produce NaN
        assert_eq!(similarity_to_angle(FULL + 1000), 0.0);
        assert!((similarity_to_angle(0) - PI / 2.0).abs() < 1e-6);
        assert!((similarity_to_angle(-FULL) - PI).abs() < 1e-6);
    }

    #[test]
    fn test_identical_descriptor_scenario() {
        let m = matrix(1, 2, &[FULL, 0]);
        let one_way = find_best_matches_one_way(&m, 0.8, PI);
        assert_eq!(one_way.matches, vec![Some(0)]);
        assert_eq!(one_way.num_matches, 1);
        assert_eq!(
            find_best_matches(&m, 0.8, PI, false),
            vec![FeatureMatch::new(0, 0)]
        );
    }

    #[test]
    fn test_tie_is_rejected() {
        let m = matrix(1, 3, &[200_000, 100, 200_000]);
        let one_way = find_best_matches_one_way(&m, 1.0, PI);
        assert_eq!(one_way.matches, vec![None]);
        assert_eq!(one_way.num_matches, 0);
    }

    #[test]
    fn test_first_maximum_wins() {
        // the first of two equal maxima is kept as best, so with a ratio
        // above 1 the tie is accepted at the lower index
        let m = matrix(1, 3, &[100, 200_000, 200_000]);
        let one_way = find_best_matches_one_way(&m, 1.5, PI);
        assert_eq!(one_way.matches, vec![Some(1)]);
    }

    #[test]
    fn test_max_distance() {
        // cos(angle) = 0.5 -> angle = pi / 3
        let m = matrix(1, 2, &[FULL / 2, 0]);
        assert_eq!(find_best_matches_one_way(&m, 0.8, 1.0).matches, vec![None]);
        assert_eq!(
            find_best_matches_one_way(&m, 0.8, 1.1).matches,
            vec![Some(0)]
        );
    }

    #[test]
    fn test_ratio_test() {
        // angles 0.5 and ~0.72
        let best = (0.5f32.cos() * FULL as f32) as i32;
        let second = (0.72f32.cos() * FULL as f32) as i32;
        let m = matrix(1, 2, &[second, best]);
        assert_eq!(
            find_best_matches_one_way(&m, 0.8, PI).matches,
            vec![Some(1)]
        );
        assert_eq!(find_best_matches_one_way(&m, 0.6, PI).matches, vec![None]);
    }

    #[test]
    fn test_empty_columns() {
        let m = matrix(3, 0, &[]);
        let one_way = find_best_matches_one_way(&m, 0.8, PI);
        assert_eq!(one_way.matches, vec![None, None, None]);
        assert_eq!(one_way.num_matches, 0);
        assert!(find_best_matches(&m, 0.8, PI, true).is_empty());
        assert!(find_best_matches(&m, 0.8, PI, false).is_empty());
    }

    #[test]
    fn test_empty_rows() {
        let m = matrix(0, 4, &[]);
        assert!(find_best_matches_one_way(&m, 0.8, PI).matches.is_empty());
        assert!(find_best_matches(&m, 0.8, PI, true).is_empty());
    }

    #[test]
    fn test_all_zero_matrix() {
        let m = matrix(2, 2, &[0, 0, 0, 0]);
        let one_way = find_best_matches_one_way(&m, 0.8, PI);
        assert_eq!(one_way.matches, vec![None, None]);
        assert!(find_best_matches(&m, 0.8, 1.5, false).is_empty());
    }

    #[test]
    fn test_cross_check() {
        // row 0 and row 1 both prefer column 0, column 0 prefers row 1
        let m = matrix(
            2,
            2,
            &[
                FULL * 9 / 10, 0, //
                FULL, FULL / 10,
            ],
        );
        assert_eq!(
            find_best_matches(&m, 0.8, PI, false),
            vec![FeatureMatch::new(0, 0), FeatureMatch::new(1, 0)]
        );
        assert_eq!(
            find_best_matches(&m, 0.8, PI, true),
            vec![FeatureMatch::new(1, 0)]
        );
    }

    #[test]
    fn test_cross_check_is_symmetric() {
        let m = matrix(
            3,
            2,
            &[
                FULL, 0, //
                0, FULL * 9 / 10, //
                FULL / 3, FULL,
            ],
        );
        let forward = find_best_matches(&m, 0.8, PI, true);
        let mut backward: Vec<_> = find_best_matches(&m.transpose(), 0.8, PI, true)
            .iter()
            .map(FeatureMatch::swapped)
            .collect();
        backward.sort();
        assert_eq!(forward, backward);
        assert_eq!(
            forward,
            vec![FeatureMatch::new(0, 0), FeatureMatch::new(2, 1)]
        );
    }
}
