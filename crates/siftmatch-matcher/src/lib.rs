#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Similarity matrices between descriptor sets.
pub mod distance;

mod error;
pub use error::MatchError;

/// Nearest neighbor search with ratio test and cross-checking.
pub mod matching;

/// Matching options and their validation.
pub mod options;

/// High level SIFT matching entry points.
pub mod sift;

pub use distance::{compute_distance_matrix, compute_guided_distance_matrix, DistanceMatrix};
pub use matching::{find_best_matches, find_best_matches_one_way, OneWayMatches};
pub use options::SiftMatchingOptions;
pub use sift::{match_guided_sift_features, match_guided_sift_features_inplace, match_sift_features};
