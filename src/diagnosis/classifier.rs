//! Threshold classification of feature differences
//!
//! Rules form an ordered decision list: the first rule whose predicate holds
//! decides the label. The nitrogen and potassium rules share their
//! saturation condition, so evaluation order matters.

use super::difference::FeatureDifference;
use crate::constants::thresholds::{
    DEFICIENCY_SATURATION_DIFF, HEALTHY_MAX_HUE_DIFF, HEALTHY_MAX_SATURATION_DIFF,
    HEALTHY_MAX_VALUE_DIFF, NITROGEN_HUE_DIFF, NITROGEN_VALUE_DIFF, POTASSIUM_VALUE_DIFF,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leaf health label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Healthy,
    NitrogenDeficiency,
    PotassiumDeficiency,
    /// No rule matched; the leaf differs from baseline in an unrecognized way
    Anomaly,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Healthy => "Healthy",
            Classification::NitrogenDeficiency => "Nitrogen Deficiency",
            Classification::PotassiumDeficiency => "Potassium Deficiency",
            Classification::Anomaly => "Unclear / Anomaly",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Rule {
    label: Classification,
    matches: fn(&FeatureDifference) -> bool,
}

fn is_healthy(d: &FeatureDifference) -> bool {
    d.hue_diff.abs() < HEALTHY_MAX_HUE_DIFF
        && d.saturation_diff.abs() < HEALTHY_MAX_SATURATION_DIFF
        && d.value_diff.abs() < HEALTHY_MAX_VALUE_DIFF
}

fn is_nitrogen_deficient(d: &FeatureDifference) -> bool {
    d.saturation_diff < DEFICIENCY_SATURATION_DIFF
        && d.value_diff < NITROGEN_VALUE_DIFF
        && d.hue_diff < NITROGEN_HUE_DIFF
}

fn is_potassium_deficient(d: &FeatureDifference) -> bool {
    d.saturation_diff < DEFICIENCY_SATURATION_DIFF
        && d.value_diff < POTASSIUM_VALUE_DIFF
        && d.hue_diff >= NITROGEN_HUE_DIFF
}

// Order is significant.
const RULES: [Rule; 3] = [
    Rule { label: Classification::Healthy, matches: is_healthy },
    Rule { label: Classification::NitrogenDeficiency, matches: is_nitrogen_deficient },
    Rule { label: Classification::PotassiumDeficiency, matches: is_potassium_deficient },
];

/// Label a feature difference; total and deterministic
///
/// NaN components fail every comparison and fall through to `Anomaly`.
pub fn classify(difference: &FeatureDifference) -> Classification {
    RULES
        .iter()
        .find(|rule| (rule.matches)(difference))
        .map_or(Classification::Anomaly, |rule| rule.label)
}
