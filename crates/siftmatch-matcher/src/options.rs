use crate::error::MatchError;

/// Options for SIFT descriptor matching.
///
/// The RANSAC fields (`confidence`, trial counts, inlier requirements and
/// `multiple_models`) describe how the two-view geometry that drives guided
/// matching is estimated. They are validated here so that one options value
/// can be shared by the whole matching pipeline, but matching itself does not
/// read them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SiftMatchingOptions {
    /// Maximum ratio between the best and second best angular distance.
    pub max_ratio: f32,
    /// Maximum angular distance of an accepted match, in radians.
    pub max_distance: f32,
    /// Keep only mutual nearest neighbors.
    pub cross_check: bool,
    /// Maximum number of matches.
    pub max_num_matches: usize,
    /// Maximum epipolar or transfer error in pixels.
    pub max_error: f64,
    /// Confidence threshold for RANSAC termination.
    pub confidence: f64,
    /// Minimum number of RANSAC iterations.
    pub min_num_trials: usize,
    /// Maximum number of RANSAC iterations.
    pub max_num_trials: usize,
    /// Expected minimum ratio of inliers.
    pub min_inlier_ratio: f64,
    /// Minimum number of inliers for a valid geometry.
    pub min_num_inliers: usize,
    /// Whether to estimate several geometric models per image pair.
    pub multiple_models: bool,
    /// Whether to run a second, geometry guided matching pass.
    pub guided_matching: bool,
}

impl Default for SiftMatchingOptions {
    fn default() -> Self {
        Self {
            max_ratio: 0.8,
            max_distance: 0.7,
            cross_check: true,
            max_num_matches: 32768,
            max_error: 4.0,
            confidence: 0.999,
            min_num_trials: 100,
            max_num_trials: 10000,
            min_inlier_ratio: 0.25,
            min_num_inliers: 15,
            multiple_models: false,
            guided_matching: false,
        }
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> MatchError {
    MatchError::InvalidOption {
        name,
        reason: reason.into(),
    }
}

impl SiftMatchingOptions {
    /// Check that all values are in range.
    ///
    /// NaN thresholds are rejected.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(self.max_ratio > 0.0) {
            return Err(invalid(
                "max_ratio",
                format!("must be > 0, got {}", self.max_ratio),
            ));
        }
        if !(self.max_distance > 0.0) {
            return Err(invalid(
                "max_distance",
                format!("must be > 0, got {}", self.max_distance),
            ));
        }
        if !(self.max_error > 0.0) {
            return Err(invalid(
                "max_error",
                format!("must be > 0, got {}", self.max_error),
            ));
        }
        if self.max_num_matches == 0 {
            return Err(invalid("max_num_matches", "must be > 0"));
        }
        if self.max_num_trials == 0 {
            return Err(invalid("max_num_trials", "must be > 0"));
        }
        if self.min_num_trials > self.max_num_trials {
            return Err(invalid(
                "min_num_trials",
                format!(
                    "must be <= max_num_trials ({}), got {}",
                    self.max_num_trials, self.min_num_trials
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_inlier_ratio) {
            return Err(invalid(
                "min_inlier_ratio",
                format!("must be in [0, 1], got {}", self.min_inlier_ratio),
            ));
        }
        if !(self.confidence > 0.0 && self.confidence <= 1.0) {
            return Err(invalid(
                "confidence",
                format!("must be in (0, 1], got {}", self.confidence),
            ));
        }
        Ok(())
    }

    /// Set the ratio test threshold.
    pub fn with_max_ratio(mut self, max_ratio: f32) -> Self {
        self.max_ratio = max_ratio;
        self
    }

    /// Set the maximum angular distance.
    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Enable or disable cross-checking.
    pub fn with_cross_check(mut self, cross_check: bool) -> Self {
        self.cross_check = cross_check;
        self
    }

    /// Set the maximum number of matches.
    pub fn with_max_num_matches(mut self, max_num_matches: usize) -> Self {
        self.max_num_matches = max_num_matches;
        self
    }

    /// Set the geometric error threshold in pixels.
    pub fn with_max_error(mut self, max_error: f64) -> Self {
        self.max_error = max_error;
        self
    }

    /// Set the RANSAC confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the RANSAC trial bounds.
    pub fn with_num_trials(mut self, min_num_trials: usize, max_num_trials: usize) -> Self {
        self.min_num_trials = min_num_trials;
        self.max_num_trials = max_num_trials;
        self
    }

    /// Set the minimum inlier ratio.
    pub fn with_min_inlier_ratio(mut self, min_inlier_ratio: f64) -> Self {
        self.min_inlier_ratio = min_inlier_ratio;
        self
    }

    /// Set the minimum number of inliers.
    pub fn with_min_num_inliers(mut self, min_num_inliers: usize) -> Self {
        self.min_num_inliers = min_num_inliers;
        self
    }

    /// Enable or disable multiple model estimation.
    pub fn with_multiple_models(mut self, multiple_models: bool) -> Self {
        self.multiple_models = multiple_models;
        self
    }

    /// Enable or disable guided matching.
    pub fn with_guided_matching(mut self, guided_matching: bool) -> Self {
        self.guided_matching = guided_matching;
        self
    }
}
