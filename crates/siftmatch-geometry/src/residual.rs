use glam::{DMat3, DVec2, DVec3};

/// Build a matrix from row-major entries.
///
/// glam stores matrices column-major, while fundamental matrices and
/// homographies are usually written row by row.
pub fn mat3_from_rows(rows: [[f64; 3]; 3]) -> DMat3 {
    DMat3::from_cols_array_2d(&rows).transpose()
}

/// Squared Sampson distance of a correspondence to the epipolar geometry `f`.
///
/// Computes `(x2ᵀ F x1)² / ((F x1)₀² + (F x1)₁² + (Fᵀ x2)₀² + (Fᵀ x2)₁²)` for
/// the homogeneous points `x1 = (x1, 1)` and `x2 = (x2, 1)`.
///
/// The value does not depend on the scale of `f`. Returns `f64::INFINITY` when
/// the denominator is exactly zero or the result overflows, so that degenerate
/// pairs never pass a threshold test.
pub fn sampson_error(f: &DMat3, x1: DVec2, x2: DVec2) -> f64 {
    let x1h = x1.extend(1.0);
    let x2h = x2.extend(1.0);
    let fx1 = *f * x1h;
    let ftx2 = f.transpose() * x2h;
    let denom = fx1.x * fx1.x + fx1.y * fx1.y + ftx2.x * ftx2.x + ftx2.y * ftx2.y;
    if denom == 0.0 {
        return f64::INFINITY;
    }
    let num = x2h.dot(fx1);
    finite_or_infinity(num * num / denom)
}

/// Squared distance between `x2` and `x1` mapped through the homography `h`.
///
/// The value does not depend on the scale of `h`. Returns `f64::INFINITY` when
/// `h` maps `x1` exactly onto the line at infinity.
pub fn homography_transfer_error(h: &DMat3, x1: DVec2, x2: DVec2) -> f64 {
    let hx: DVec3 = *h * x1.extend(1.0);
    if hx.z == 0.0 {
        return f64::INFINITY;
    }
    let projected = DVec2::new(hx.x / hx.z, hx.y / hx.z);
    finite_or_infinity(projected.distance_squared(x2))
}

#[inline]
fn finite_or_infinity(residual: f64) -> f64 {
    if residual.is_finite() {
        residual
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // F for a pure horizontal translation: epipolar lines are image rows
    fn horizontal_fundamental() -> DMat3 {
        mat3_from_rows([[0.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]])
    }

    #[test]
    fn test_mat3_from_rows() {
        let m = mat3_from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(m.row(0), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.col(0), DVec3::new(1.0, 4.0, 7.0));
        let v = m * DVec3::new(1.0, 0.0, 0.0);
        assert_eq!(v, DVec3::new(1.0, 4.0, 7.0));
    }

    #[test]
    fn test_sampson_on_epipolar_line() {
        let f = horizontal_fundamental();
        let err = sampson_error(&f, DVec2::new(10.0, 5.0), DVec2::new(42.0, 5.0));
        assert_relative_eq!(err, 0.0);
    }

    #[test]
    fn test_sampson_off_epipolar_line() {
        let f = horizontal_fundamental();
        // x2ᵀ F x1 = y1 - y2 = -3, both gradients have unit length
        let err = sampson_error(&f, DVec2::new(10.0, 5.0), DVec2::new(42.0, 8.0));
        assert_relative_eq!(err, 4.5);
    }

    #[test]
    fn test_sampson_degenerate() {
        let err = sampson_error(&DMat3::ZERO, DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0));
        assert_eq!(err, f64::INFINITY);
    }

    #[test]
    fn test_sampson_is_scale_invariant() {
        let x1 = DVec2::new(10.0, 5.0);
        for scale in [1e-7, 1e-3, 1e5] {
            let f = horizontal_fundamental() * scale;
            assert_relative_eq!(sampson_error(&f, x1, DVec2::new(42.0, 5.0)), 0.0);
            assert_relative_eq!(
                sampson_error(&f, x1, DVec2::new(42.0, 8.0)),
                4.5,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_homography_identity() {
        let err = homography_transfer_error(
            &DMat3::IDENTITY,
            DVec2::new(1.0, 2.0),
            DVec2::new(4.0, 6.0),
        );
        assert_relative_eq!(err, 25.0);
    }

    #[test]
    fn test_homography_translation_and_scale() {
        // x' = 2x + 3, y' = 2y - 1, expressed with w = 2
        let h = mat3_from_rows([[4.0, 0.0, 6.0], [0.0, 4.0, -2.0], [0.0, 0.0, 2.0]]);
        let err = homography_transfer_error(&h, DVec2::new(1.0, 1.0), DVec2::new(5.0, 1.0));
        assert_relative_eq!(err, 0.0);
    }

    #[test]
    fn test_homography_is_scale_invariant() {
        for scale in [1e-13, 1e-6, 1e8] {
            let h = DMat3::IDENTITY * scale;
            let err = homography_transfer_error(&h, DVec2::new(1.0, 1.0), DVec2::new(1.0, 1.0));
            assert_relative_eq!(err, 0.0);
            let err = homography_transfer_error(&h, DVec2::new(1.0, 2.0), DVec2::new(4.0, 6.0));
            assert_relative_eq!(err, 25.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_homography_point_at_infinity() {
        let h = mat3_from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, -1.0]]);
        let err = homography_transfer_error(&h, DVec2::new(1.0, 0.0), DVec2::new(0.0, 0.0));
        assert_eq!(err, f64::INFINITY);
    }
}
