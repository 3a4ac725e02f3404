use rayon::prelude::*;

use siftmatch_core::descriptor::descriptor_dot;
use siftmatch_core::{Descriptor, Keypoint};

use crate::error::MatchError;

/// Dense similarity matrix between two descriptor sets.
///
/// Entry `(i1, i2)` is the integer dot product of descriptor `i1` of the first
/// set and descriptor `i2` of the second set, or 0 when a geometric filter
/// rejected the pair. Stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<i32>,
    rows: usize,
    cols: usize,
}

impl DistanceMatrix {
    /// Create a matrix from row-major data.
    ///
    /// Returns `None` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<i32>) -> Option<Self> {
        (rows.checked_mul(cols)? == data.len()).then_some(Self { data, rows, cols })
    }

    fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0; rows * cols],
            rows,
            cols,
        }
    }

    /// Number of rows (features of the first set).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (features of the second set).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at `(row, col)`, `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// The similarities of feature `row` to every feature of the second set.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    #[inline]
    pub fn row(&self, row: usize) -> &[i32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// The matrix with the roles of the two sets exchanged.
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.data[c * self.rows + r] = self.data[r * self.cols + c];
            }
        }
        out
    }

    /// The row-major entries.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }
}

/// Compute the similarity of every pair of descriptors.
///
/// Rows are filled in parallel.
pub fn compute_distance_matrix(
    descriptors1: &[Descriptor],
    descriptors2: &[Descriptor],
) -> DistanceMatrix {
    fill_rows(descriptors1.len(), descriptors2.len(), |i1, row| {
        let d1 = &descriptors1[i1];
        row.iter_mut()
            .zip(descriptors2.iter())
            .for_each(|(dst, d2)| *dst = descriptor_dot(d1, d2));
    })
}

/// Compute the similarity of every pair of descriptors, zeroing the pairs for
/// which `filter(x1, y1, x2, y2)` returns `true`.
///
/// Keypoints must be index-aligned with their descriptors.
pub fn compute_guided_distance_matrix<F>(
    keypoints1: &[Keypoint],
    keypoints2: &[Keypoint],
    descriptors1: &[Descriptor],
    descriptors2: &[Descriptor],
    filter: F,
) -> Result<DistanceMatrix, MatchError>
where
    F: Fn(f32, f32, f32, f32) -> bool + Sync,
{
    check_shape("features1", keypoints1, descriptors1)?;
    check_shape("features2", keypoints2, descriptors2)?;

    Ok(fill_rows(descriptors1.len(), descriptors2.len(), |i1, row| {
        let kp1 = &keypoints1[i1];
        let d1 = &descriptors1[i1];
        row.iter_mut()
            .zip(keypoints2.iter().zip(descriptors2.iter()))
            .for_each(|(dst, (kp2, d2))| {
                *dst = if filter(kp1.x, kp1.y, kp2.x, kp2.y) {
                    0
                } else {
                    descriptor_dot(d1, d2)
                };
            });
    }))
}

fn check_shape(
    name: &'static str,
    keypoints: &[Keypoint],
    descriptors: &[Descriptor],
) -> Result<(), MatchError> {
    if keypoints.len() != descriptors.len() {
        return Err(MatchError::ShapeMismatch {
            name,
            keypoints: keypoints.len(),
            descriptors: descriptors.len(),
        });
    }
    Ok(())
}

fn fill_rows(rows: usize, cols: usize, f: impl Fn(usize, &mut [i32]) + Sync) -> DistanceMatrix {
    let mut out = DistanceMatrix::zeros(rows, cols);
    // par_chunks_exact_mut panics on a zero chunk size
    if rows == 0 || cols == 0 {
        return out;
    }
    out.data
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(i1, row)| f(i1, row));
    out
}
