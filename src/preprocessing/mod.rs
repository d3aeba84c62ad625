//! Preprocessing module
//!
//! Brings decoded photographs to a canonical size before segmentation and
//! feature extraction.

pub mod normalize;

pub use normalize::ImageNormalizer;
