use glam::DMat3;
use siftmatch_core::FeatureMatch;

/// Classification of a two-view geometry hypothesis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TwoViewConfig {
    /// No geometry has been estimated.
    #[default]
    Undefined,
    /// Estimation failed or there were too few inliers.
    Degenerate,
    /// Essential matrix from known intrinsics; `f` holds the fundamental matrix.
    Calibrated,
    /// Fundamental matrix without known intrinsics.
    Uncalibrated,
    /// Homography induced by a dominant scene plane.
    Planar,
    /// Homography from a pure camera rotation.
    Panoramic,
    /// Homography that is either planar or panoramic.
    PlanarOrPanoramic,
    /// Pure 2D transform along the image border, e.g. a watermark.
    Watermark,
    /// Several geometric models were found.
    Multiple,
}

impl TwoViewConfig {
    /// Whether the hypothesis is described by the fundamental matrix.
    pub fn is_epipolar(&self) -> bool {
        matches!(self, Self::Calibrated | Self::Uncalibrated)
    }

    /// Whether the hypothesis is described by the homography.
    pub fn is_homography(&self) -> bool {
        matches!(
            self,
            Self::Planar | Self::Panoramic | Self::PlanarOrPanoramic
        )
    }
}

/// A two-view geometry hypothesis and the matches consistent with it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoViewGeometry {
    /// Configuration tag.
    pub config: TwoViewConfig,
    /// Fundamental matrix mapping points in image 1 to epipolar lines in image 2.
    pub f: DMat3,
    /// Homography mapping points in image 1 to image 2.
    pub h: DMat3,
    /// Matches found for this hypothesis.
    pub inlier_matches: Vec<FeatureMatch>,
}

impl Default for TwoViewGeometry {
    fn default() -> Self {
        Self::new(TwoViewConfig::Undefined, DMat3::IDENTITY, DMat3::IDENTITY)
    }
}

impl TwoViewGeometry {
    /// Create a geometry with no inlier matches.
    pub fn new(config: TwoViewConfig, f: DMat3, h: DMat3) -> Self {
        Self {
            config,
            f,
            h,
            inlier_matches: Vec::new(),
        }
    }

    /// Create an epipolar geometry from a fundamental matrix.
    pub fn from_fundamental(config: TwoViewConfig, f: DMat3) -> Self {
        Self::new(config, f, DMat3::IDENTITY)
    }

    /// Create a homography geometry.
    pub fn from_homography(config: TwoViewConfig, h: DMat3) -> Self {
        Self::new(config, DMat3::IDENTITY, h)
    }

    /// Number of stored inlier matches.
    pub fn num_inliers(&self) -> usize {
        self.inlier_matches.len()
    }
}
