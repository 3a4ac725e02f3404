#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Geometric filters restricting matching to plausible correspondences.
pub mod guided;

/// Point-to-model residuals for fundamental matrices and homographies.
pub mod residual;

/// Two-view geometry container and configuration tags.
pub mod twoview;

pub use guided::GuidedFilter;
pub use residual::{homography_transfer_error, mat3_from_rows, sampson_error};
pub use twoview::{TwoViewConfig, TwoViewGeometry};
