/// A keypoint location with a local affine frame.
///
/// The frame `[[a11, a12], [a21, a22]]` encodes the scale, orientation and
/// shear of the detected region. Matching only consumes `x` and `y`; the
/// shape is kept so that detector output can be passed through unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keypoint {
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate.
    pub y: f32,
    /// Affine frame entry (row 0, col 0).
    pub a11: f32,
    /// Affine frame entry (row 0, col 1).
    pub a12: f32,
    /// Affine frame entry (row 1, col 0).
    pub a21: f32,
    /// Affine frame entry (row 1, col 1).
    pub a22: f32,
}

impl Default for Keypoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Keypoint {
    /// Create a keypoint with an identity frame.
    pub fn new(x: f32, y: f32) -> Self {
        Self::from_affine(x, y, 1.0, 0.0, 0.0, 1.0)
    }

    /// Create a keypoint from an isotropic scale and an orientation in radians.
    pub fn from_scale_orientation(x: f32, y: f32, scale: f32, orientation: f32) -> Self {
        let (sin, cos) = orientation.sin_cos();
        Self::from_affine(
            x,
            y,
            scale * cos,
            -scale * sin,
            scale * sin,
            scale * cos,
        )
    }

    /// Create a keypoint from a full affine frame.
    pub fn from_affine(x: f32, y: f32, a11: f32, a12: f32, a21: f32, a22: f32) -> Self {
        Self {
            x,
            y,
            a11,
            a12,
            a21,
            a22,
        }
    }

    /// Mean of the two axis scales.
    pub fn scale(&self) -> f32 {
        0.5 * (self.scale_x() + self.scale_y())
    }

    /// Length of the first frame axis.
    pub fn scale_x(&self) -> f32 {
        self.a11.hypot(self.a21)
    }

    /// Length of the second frame axis.
    pub fn scale_y(&self) -> f32 {
        self.a12.hypot(self.a22)
    }

    /// Orientation of the first frame axis in radians, in `(-pi, pi]`.
    pub fn orientation(&self) -> f32 {
        self.a21.atan2(self.a11)
    }

    /// Angular deviation of the second axis from orthogonality.
    pub fn shear(&self) -> f32 {
        (-self.a12).atan2(self.a22) - self.orientation()
    }

    /// The pixel location as `[x, y]`.
    #[inline]
    pub fn xy(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}
