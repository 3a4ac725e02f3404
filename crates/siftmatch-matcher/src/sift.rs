use siftmatch_core::{Descriptor, FeatureMatch, Keypoint};
use siftmatch_geometry::{GuidedFilter, TwoViewGeometry};

use crate::distance::{compute_distance_matrix, compute_guided_distance_matrix};
use crate::error::MatchError;
use crate::matching::find_best_matches;
use crate::options::SiftMatchingOptions;

/// Match two sets of SIFT descriptors by appearance only.
///
/// # Arguments
///
/// * `descriptors1` - Descriptors of the first image.
/// * `descriptors2` - Descriptors of the second image.
/// * `options` - Matching thresholds; validated before any work is done.
///
/// # Returns
///
/// The accepted matches, ordered by `idx1`.
pub fn match_sift_features(
    descriptors1: &[Descriptor],
    descriptors2: &[Descriptor],
    options: &SiftMatchingOptions,
) -> Result<Vec<FeatureMatch>, MatchError> {
    options.validate()?;

    let distances = compute_distance_matrix(descriptors1, descriptors2);
    let matches = find_best_matches(
        &distances,
        options.max_ratio,
        options.max_distance,
        options.cross_check,
    );

    log::debug!(
        "matched {} against {} descriptors: {} matches",
        descriptors1.len(),
        descriptors2.len(),
        matches.len()
    );

    Ok(matches)
}

/// Match two sets of SIFT features, restricted to pairs consistent with
/// `geometry`.
///
/// Pairs whose epipolar or homography residual exceeds `options.max_error`
/// pixels are excluded before the nearest neighbor search. If the geometry
/// configuration does not support guided matching, no matching is done and
/// an empty list is returned.
///
/// # Errors
///
/// Returns [`MatchError::InvalidOption`] for invalid options and
/// [`MatchError::ShapeMismatch`] if keypoints and descriptors of an image
/// differ in length.
pub fn match_guided_sift_features(
    keypoints1: &[Keypoint],
    keypoints2: &[Keypoint],
    descriptors1: &[Descriptor],
    descriptors2: &[Descriptor],
    geometry: &TwoViewGeometry,
    options: &SiftMatchingOptions,
) -> Result<Vec<FeatureMatch>, MatchError> {
    Ok(guided_matches(
        keypoints1,
        keypoints2,
        descriptors1,
        descriptors2,
        geometry,
        options,
    )?
    .unwrap_or_default())
}

/// Like [`match_guided_sift_features`], but stores the result in
/// `geometry.inlier_matches`.
///
/// Previous inlier matches are replaced. For unsupported configurations the
/// geometry is left untouched.
pub fn match_guided_sift_features_inplace(
    keypoints1: &[Keypoint],
    keypoints2: &[Keypoint],
    descriptors1: &[Descriptor],
    descriptors2: &[Descriptor],
    geometry: &mut TwoViewGeometry,
    options: &SiftMatchingOptions,
) -> Result<(), MatchError> {
    if let Some(matches) = guided_matches(
        keypoints1,
        keypoints2,
        descriptors1,
        descriptors2,
        geometry,
        options,
    )? {
        geometry.inlier_matches = matches;
    }
    Ok(())
}

/// `None` when the geometry does not support guided matching.
fn guided_matches(
    keypoints1: &[Keypoint],
    keypoints2: &[Keypoint],
    descriptors1: &[Descriptor],
    descriptors2: &[Descriptor],
    geometry: &TwoViewGeometry,
    options: &SiftMatchingOptions,
) -> Result<Option<Vec<FeatureMatch>>, MatchError> {
    options.validate()?;

    let filter = GuidedFilter::from_geometry(geometry, options.max_error);
    if !filter.is_supported() {
        log::debug!(
            "skipping guided matching for configuration {:?}",
            geometry.config
        );
        return Ok(None);
    }

    let distances = compute_guided_distance_matrix(
        keypoints1,
        keypoints2,
        descriptors1,
        descriptors2,
        |x1, y1, x2, y2| filter.rejects(x1, y1, x2, y2),
    )?;
    let matches = find_best_matches(
        &distances,
        options.max_ratio,
        options.max_distance,
        options.cross_check,
    );

    log::debug!(
        "guided matching ({:?}) of {} against {} descriptors: {} matches",
        geometry.config,
        descriptors1.len(),
        descriptors2.len(),
        matches.len()
    );

    Ok(Some(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use siftmatch_core::DESCRIPTOR_DIM;
    use siftmatch_geometry::TwoViewConfig;

    // four saturated bins give a byte norm of 510
    fn unit(index: usize) -> Descriptor {
        let mut d = [0u8; DESCRIPTOR_DIM];
        d[index..index + 4].fill(255);
        d
    }

    #[test]
    fn test_match_sift_features() {
        let d1 = [unit(0), unit(10), unit(20)];
        let d2 = [unit(20), unit(0)];
        let options = SiftMatchingOptions::default();
        let matches = match_sift_features(&d1, &d2, &options).unwrap();
        assert_eq!(
            matches,
            vec![FeatureMatch::new(0, 1), FeatureMatch::new(2, 0)]
        );
    }

    #[test]
    fn test_invalid_options_fail_first() {
        let options = SiftMatchingOptions::default().with_max_ratio(0.0);
        let err = match_sift_features(&[unit(0)], &[unit(0)], &options).unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidOption {
                name: "max_ratio",
                ..
            }
        ));

        // options are checked before the shapes
        let geometry = TwoViewGeometry::new(
            TwoViewConfig::Planar,
            glam::DMat3::IDENTITY,
            glam::DMat3::IDENTITY,
        );
        let err = match_guided_sift_features(&[], &[], &[unit(0)], &[], &geometry, &options)
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidOption { .. }));
    }

    #[test]
    fn test_unsupported_before_shape_check() {
        let geometry = TwoViewGeometry::default();
        let options = SiftMatchingOptions::default();
        let matches =
            match_guided_sift_features(&[], &[], &[unit(0)], &[unit(0)], &geometry, &options)
                .unwrap();
        assert!(matches.is_empty());
    }
}
