//! Signed per-channel differences between baseline and test features

use crate::color::ColorFeatures;
use serde::{Deserialize, Serialize};
use std::ops::Neg;

/// Baseline minus test, per HSV channel
///
/// A positive component means the test sample is lower than the baseline on
/// that channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureDifference {
    pub hue_diff: f64,
    pub saturation_diff: f64,
    pub value_diff: f64,
}

impl FeatureDifference {
    pub fn new(hue_diff: f64, saturation_diff: f64, value_diff: f64) -> Self {
        Self {
            hue_diff,
            saturation_diff,
            value_diff,
        }
    }
}

impl Neg for FeatureDifference {
    type Output = FeatureDifference;

    fn neg(self) -> Self::Output {
        FeatureDifference::new(-self.hue_diff, -self.saturation_diff, -self.value_diff)
    }
}

/// Element-wise `baseline - test`
pub fn compare_features(baseline: &ColorFeatures, test: &ColorFeatures) -> FeatureDifference {
    FeatureDifference::new(
        baseline.avg_hue - test.avg_hue,
        baseline.avg_saturation - test.avg_saturation,
        baseline.avg_value - test.avg_value,
    )
}
