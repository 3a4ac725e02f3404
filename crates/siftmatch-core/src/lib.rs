#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Byte-quantized SIFT descriptors and their normalization.
pub mod descriptor;

/// Keypoints with an affine shape.
pub mod keypoint;

/// Correspondences between two feature sets.
pub mod matches;

pub use descriptor::{Descriptor, DescriptorNormalization, DESCRIPTOR_DIM};
pub use keypoint::Keypoint;
pub use matches::FeatureMatch;
