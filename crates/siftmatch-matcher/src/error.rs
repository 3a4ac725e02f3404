/// Errors that can occur while matching descriptors.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MatchError {
    /// A matching option has an invalid value.
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption {
        /// Name of the offending option.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Keypoints and descriptors of one image have different lengths.
    #[error("{name}: {keypoints} keypoints but {descriptors} descriptors")]
    ShapeMismatch {
        /// Which feature set is inconsistent.
        name: &'static str,
        /// Number of keypoints.
        keypoints: usize,
        /// Number of descriptors.
        descriptors: usize,
    },
}
