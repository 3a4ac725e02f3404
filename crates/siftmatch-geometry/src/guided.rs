use glam::{DMat3, DVec2};

use crate::residual::{homography_transfer_error, sampson_error};
use crate::twoview::TwoViewGeometry;

/// A predicate that rejects candidate correspondences inconsistent with a
/// two-view geometry hypothesis.
///
/// `max_residual` is the squared pixel threshold; a pair is rejected when its
/// squared residual is strictly greater.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GuidedFilter {
    /// Sampson distance to the epipolar line of the fundamental matrix.
    Epipolar {
        /// Fundamental matrix.
        f: DMat3,
        /// Squared residual threshold.
        max_residual: f64,
    },
    /// Transfer error under the homography.
    Homography {
        /// Homography from image 1 to image 2.
        h: DMat3,
        /// Squared residual threshold.
        max_residual: f64,
    },
    /// The configuration does not support guided matching.
    Unsupported,
}

impl GuidedFilter {
    /// Select the filter for a geometry and a pixel error threshold.
    ///
    /// Calibrated and uncalibrated geometries use the fundamental matrix; planar
    /// and panoramic geometries use the homography. Every other configuration
    /// yields [`GuidedFilter::Unsupported`].
    pub fn from_geometry(geometry: &TwoViewGeometry, max_error: f64) -> Self {
        let max_residual = max_error * max_error;
        if geometry.config.is_epipolar() {
            Self::Epipolar {
                f: geometry.f,
                max_residual,
            }
        } else if geometry.config.is_homography() {
            Self::Homography {
                h: geometry.h,
                max_residual,
            }
        } else {
            Self::Unsupported
        }
    }

    /// Whether guided matching can run with this filter.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Squared residual of the pair `(x1, y1) <-> (x2, y2)`.
    ///
    /// `None` for [`GuidedFilter::Unsupported`].
    pub fn residual(&self, x1: f32, y1: f32, x2: f32, y2: f32) -> Option<f64> {
        let p1 = DVec2::new(x1 as f64, y1 as f64);
        let p2 = DVec2::new(x2 as f64, y2 as f64);
        match self {
            Self::Epipolar { f, .. } => Some(sampson_error(f, p1, p2)),
            Self::Homography { h, .. } => Some(homography_transfer_error(h, p1, p2)),
            Self::Unsupported => None,
        }
    }

    /// Returns `true` when the pair must be excluded from matching.
    ///
    /// [`GuidedFilter::Unsupported`] never rejects.
    #[inline]
    pub fn rejects(&self, x1: f32, y1: f32, x2: f32, y2: f32) -> bool {
        match self {
            Self::Epipolar { max_residual, .. } | Self::Homography { max_residual, .. } => self
                .residual(x1, y1, x2, y2)
                .is_some_and(|residual| residual > *max_residual),
            Self::Unsupported => false,
        }
    }
}
