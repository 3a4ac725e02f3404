#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use siftmatch_core as core;

#[doc(inline)]
pub use siftmatch_geometry as geometry;

#[doc(inline)]
pub use siftmatch_matcher as matcher;
