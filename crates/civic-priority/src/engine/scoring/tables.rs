use crate::engine::domain::{ActivityTier, ServiceCategory};
use serde::{Deserialize, Serialize};

/// Fixed factor weights applied to every composite score. The four entries
/// must sum to 1.00; they are constants, not learned parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub urgency: f64,
    pub seasonality: f64,
    pub importance: f64,
    pub activity: f64,
}

impl Weights {
    pub const fn standard() -> Self {
        Self {
            urgency: 0.40,
            seasonality: 0.25,
            importance: 0.20,
            activity: 0.15,
        }
    }

    pub fn sum(&self) -> f64 {
        self.urgency + self.seasonality + self.importance + self.activity
    }
}

pub(crate) const OFF_PEAK_REASON: &str = "Off-peak season";
pub(crate) const IN_SEASON_REASON: &str = "Peak demand season";

/// Calendar-driven demand profile for one service category.
pub(crate) struct SeasonalPattern {
    pub(crate) peak_months: &'static [u32],
    pub(crate) peak_score: f64,
    pub(crate) normal_score: f64,
    pub(crate) peak_reason: &'static str,
}

pub(crate) fn seasonal_pattern(category: ServiceCategory) -> SeasonalPattern {
    match category {
        ServiceCategory::Travel | ServiceCategory::Passport => SeasonalPattern {
            peak_months: &[5, 6, 7, 8],
            peak_score: 90.0,
            normal_score: 50.0,
            peak_reason: "Travel and vacation season",
        },
        ServiceCategory::Vehicle => SeasonalPattern {
            peak_months: &[1, 2, 11, 12],
            peak_score: 85.0,
            normal_score: 60.0,
            peak_reason: "Registration renewal season",
        },
        // Identity paperwork has no seasonal swing; the flat profile keeps
        // the component meaningful without favoring any month.
        ServiceCategory::Identity => SeasonalPattern {
            peak_months: &[],
            peak_score: 70.0,
            normal_score: 70.0,
            peak_reason: "Stable demand year-round",
        },
        ServiceCategory::Civil => SeasonalPattern {
            peak_months: &[6, 7, 8],
            peak_score: 80.0,
            normal_score: 60.0,
            peak_reason: "Civil affairs season",
        },
        _ => SeasonalPattern {
            peak_months: &[],
            peak_score: 60.0,
            normal_score: 60.0,
            peak_reason: "Normal demand",
        },
    }
}

/// Static criticality of a service category and its fixed explanation.
pub(crate) fn importance(category: ServiceCategory) -> (f64, &'static str) {
    match category {
        ServiceCategory::Identity | ServiceCategory::Civil => {
            (95.0, "Essential document for daily life")
        }
        ServiceCategory::Passport | ServiceCategory::Travel => {
            (90.0, "Needed for travel and external transactions")
        }
        ServiceCategory::DrivingLicense => (85.0, "Necessary for daily mobility"),
        ServiceCategory::Health => (80.0, "Needed for health services"),
        ServiceCategory::Vehicle => (75.0, "Legally required for the vehicle"),
        ServiceCategory::Education => (75.0, "Required for education"),
        ServiceCategory::Business => (70.0, "Needed for business"),
        ServiceCategory::Housing => (70.0, "Housing services"),
        ServiceCategory::Other => (60.0, "General services"),
    }
}

/// Base engagement score per activity tier.
pub(crate) fn activity_base(tier: ActivityTier) -> (f64, &'static str) {
    match tier {
        ActivityTier::High => (90.0, "Active user - benefits from early alerts"),
        ActivityTier::Medium => (70.0, "Regular user"),
        ActivityTier::Low => (50.0, "Low-activity user"),
        ActivityTier::Inactive => (30.0, "Inactive user"),
        ActivityTier::Unspecified => (60.0, "Average activity"),
    }
}
