//! Leaf detection module
//!
//! This module separates leaf-colored pixels from the photograph background
//! so color features describe the leaf rather than its surroundings.

pub mod leaf;

pub use leaf::{apply_mask, LeafSegmentation, LeafSegmenter};
