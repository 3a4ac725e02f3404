//! Byte-quantized SIFT descriptors.
//!
//! Real-valued descriptors are normalized to unit length and scaled by 512
//! before rounding to bytes, so the integer dot product of two quantized
//! descriptors approximates `512² · cos(angle)` between the real-valued inputs.

/// Number of histogram bins in a SIFT descriptor (4x4 spatial cells, 8 orientations).
pub const DESCRIPTOR_DIM: usize = 128;

/// A SIFT descriptor quantized to unsigned bytes.
pub type Descriptor = [u8; DESCRIPTOR_DIM];

/// Scale applied to a unit-length descriptor before byte quantization.
pub const DESCRIPTOR_SCALE: f32 = 512.0;

/// Normalization applied to a raw descriptor before quantization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DescriptorNormalization {
    /// Divide by the L2 norm.
    #[default]
    L2,
    /// Divide by the L1 norm and take the element-wise square root (RootSIFT).
    L1Root,
}

/// Normalize a descriptor in place to unit L2 norm.
///
/// A zero vector is left unchanged.
pub fn l2_normalize(desc: &mut [f32]) {
    let norm = desc.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm == 0.0 {
        return;
    }
    desc.iter_mut().for_each(|v| *v /= norm);
}

/// Normalize a descriptor in place with the RootSIFT scheme.
///
/// For non-negative inputs the result has unit L2 norm. A zero vector is left
/// unchanged.
pub fn l1_root_normalize(desc: &mut [f32]) {
    let norm = desc.iter().map(|v| v.abs()).sum::<f32>();
    if norm == 0.0 {
        return;
    }
    desc.iter_mut().for_each(|v| *v = (*v / norm).sqrt());
}

/// Quantize a normalized descriptor to bytes: `round(512 * v)` truncated to `[0, 255]`.
pub fn descriptor_to_bytes(desc: &[f32; DESCRIPTOR_DIM]) -> Descriptor {
    let mut out = [0u8; DESCRIPTOR_DIM];
    out.iter_mut().zip(desc.iter()).for_each(|(dst, &v)| {
        *dst = (DESCRIPTOR_SCALE * v).round().clamp(0.0, 255.0) as u8;
    });
    out
}

/// Normalize a raw descriptor and quantize it to bytes.
pub fn quantize_descriptor(
    raw: &[f32; DESCRIPTOR_DIM],
    normalization: DescriptorNormalization,
) -> Descriptor {
    let mut desc = *raw;
    match normalization {
        DescriptorNormalization::L2 => l2_normalize(&mut desc),
        DescriptorNormalization::L1Root => l1_root_normalize(&mut desc),
    }
    descriptor_to_bytes(&desc)
}

/// Reorder a descriptor from the VLFeat bin layout to the UBC (Lowe) layout.
///
/// Both layouts store 16 spatial cells of 8 orientation bins each; they differ
/// in the direction the orientation bins are enumerated.
pub fn vlfeat_to_ubc(desc: &Descriptor) -> Descriptor {
    const Q: [usize; 8] = [0, 7, 6, 5, 4, 3, 2, 1];
    let mut out = [0u8; DESCRIPTOR_DIM];
    for i in 0..4 {
        for j in 0..4 {
            let cell = 8 * (j + 4 * i);
            for (k, &q) in Q.iter().enumerate() {
                out[cell + q] = desc[cell + k];
            }
        }
    }
    out
}

/// Integer dot product of two byte descriptors.
///
/// Each element is widened to `i32` before multiplying; the maximum value
/// `128 * 255 * 255` does not fit in 16 bits.
#[inline]
pub fn descriptor_dot(a: &Descriptor, b: &Descriptor) -> i32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| x as i32 * y as i32)
        .sum()
}
