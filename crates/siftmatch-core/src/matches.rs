/// A correspondence between feature `idx1` of the first set and feature
/// `idx2` of the second set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureMatch {
    /// Row index into the first descriptor set.
    pub idx1: usize,
    /// Row index into the second descriptor set.
    pub idx2: usize,
}

impl FeatureMatch {
    /// Create a new correspondence.
    #[inline]
    pub fn new(idx1: usize, idx2: usize) -> Self {
        Self { idx1, idx2 }
    }

    /// The same correspondence seen from the other image.
    #[inline]
    pub fn swapped(&self) -> Self {
        Self {
            idx1: self.idx2,
            idx2: self.idx1,
        }
    }
}

impl From<(usize, usize)> for FeatureMatch {
    #[inline]
    fn from((idx1, idx2): (usize, usize)) -> Self {
        Self { idx1, idx2 }
    }
}

impl From<FeatureMatch> for (usize, usize) {
    #[inline]
    fn from(m: FeatureMatch) -> Self {
        (m.idx1, m.idx2)
    }
}
