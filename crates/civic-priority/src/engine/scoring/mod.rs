mod tables;

pub use tables::Weights;

use chrono::{Datelike, NaiveDate};

use crate::engine::domain::{
    ActivityTier, ComponentScores, FactorComponent, PriorityLevel, ScoreBreakdown, SeasonalityFlag,
    ServiceCategory, ServiceRecord, UrgencyBand, UrgencyComponent, UserProfile,
};

/// Raised when one service produced a composite score the recommender
/// cannot rank. The offending service is skipped, never the whole run.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("service {service_id} produced an unrankable composite score {score}")]
    UnrankableScore { service_id: u64, score: f64 },
}

/// Pure scoring function over (service, user, evaluation date).
///
/// The date is injected at construction rather than read from the process
/// clock so identical inputs always produce identical breakdowns.
pub struct PriorityScorer {
    today: NaiveDate,
    weights: Weights,
}

impl PriorityScorer {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            weights: Weights::standard(),
        }
    }

    /// Read-only view of the weight table for diagnostics surfaces.
    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Score one service for one user. Infallible: every malformed field
    /// falls back to a documented default instead of erroring.
    pub fn score(&self, service: &ServiceRecord, user: &UserProfile) -> ScoreBreakdown {
        let category = ServiceCategory::from_raw(&service.category);
        let tier = ActivityTier::from_raw(user.activity_level.as_deref());
        let flag = service
            .seasonality
            .as_deref()
            .and_then(SeasonalityFlag::from_raw);

        let (urgency_score, band) = urgency(service.days_left);
        let (seasonality_score, season_reason) = self.seasonality(category, flag);
        let (importance_score, importance_reason) = tables::importance(category);
        let (activity_score, activity_reason) = activity(tier, service.usage_count);

        let final_score = round2(
            urgency_score * self.weights.urgency
                + seasonality_score * self.weights.seasonality
                + importance_score * self.weights.importance
                + activity_score * self.weights.activity,
        );

        let mut reasons = Vec::new();
        if service.days_left <= 14 {
            reasons.push(format!("Only {} days left", service.days_left));
        } else if service.days_left <= 30 {
            reasons.push(format!("{} days left", service.days_left));
        }
        if urgency_score >= 85.0 {
            reasons.push("Urgent - immediate action needed".to_string());
        } else if urgency_score >= 70.0 {
            reasons.push("Important - action advised soon".to_string());
        }
        if seasonality_score >= 80.0 {
            reasons.push(season_reason.to_string());
        }
        if importance_score >= 85.0 {
            reasons.push(importance_reason.to_string());
        }
        if service.usage_count >= 3 {
            reasons.push(format!("Used {} times before", service.usage_count));
        }

        ScoreBreakdown {
            service_id: service.service_id,
            service_name: service.name.clone(),
            final_score,
            priority_level: PriorityLevel::from_score(final_score),
            components: ComponentScores {
                urgency: UrgencyComponent {
                    score: round2(urgency_score),
                    band,
                    weight: self.weights.urgency,
                },
                seasonality: FactorComponent {
                    score: round2(seasonality_score),
                    reason: season_reason.to_string(),
                    weight: self.weights.seasonality,
                },
                importance: FactorComponent {
                    score: round2(importance_score),
                    reason: importance_reason.to_string(),
                    weight: self.weights.importance,
                },
                activity: FactorComponent {
                    score: round2(activity_score),
                    reason: activity_reason,
                    weight: self.weights.activity,
                },
            },
            reasons,
            days_left: service.days_left,
            expiry_date: service.expiry_date.clone(),
        }
    }

    /// Per-item fallible wrapper for the recommender's skip-and-continue
    /// policy. Rejects any composite the ranking step could not order.
    pub fn try_score(
        &self,
        service: &ServiceRecord,
        user: &UserProfile,
    ) -> Result<ScoreBreakdown, ScoreError> {
        let breakdown = self.score(service, user);
        if !breakdown.final_score.is_finite() {
            return Err(ScoreError::UnrankableScore {
                service_id: service.service_id,
                score: breakdown.final_score,
            });
        }
        Ok(breakdown)
    }

    fn seasonality(
        &self,
        category: ServiceCategory,
        flag: Option<SeasonalityFlag>,
    ) -> (f64, &'static str) {
        match flag {
            Some(SeasonalityFlag::InSeason) => (90.0, tables::IN_SEASON_REASON),
            Some(SeasonalityFlag::OutOfSeason) => (50.0, tables::OFF_PEAK_REASON),
            None => {
                let pattern = tables::seasonal_pattern(category);
                if pattern.peak_months.contains(&self.today.month()) {
                    (pattern.peak_score, pattern.peak_reason)
                } else {
                    (pattern.normal_score, tables::OFF_PEAK_REASON)
                }
            }
        }
    }
}

/// Piecewise urgency curve over days remaining. Strictly non-increasing as
/// the deadline moves out; expired services pin to 100.
///
/// The 1-7 day bracket intentionally reproduces the historical formula,
/// which tops out slightly above 100 at one day remaining. The weighted
/// composite still stays inside [0, 100].
fn urgency(days_left: i64) -> (f64, UrgencyBand) {
    if days_left <= 0 {
        (100.0, UrgencyBand::ExpiredImmediate)
    } else if days_left <= 7 {
        ((95 + (7 - days_left)) as f64, UrgencyBand::VeryCritical)
    } else if days_left <= 14 {
        (
            85.0 + (14 - days_left) as f64 * 0.7,
            UrgencyBand::Critical,
        )
    } else if days_left <= 30 {
        (
            70.0 + (30 - days_left) as f64 * 0.5,
            UrgencyBand::Important,
        )
    } else if days_left <= 60 {
        (50.0 + (60 - days_left) as f64 * 0.33, UrgencyBand::Medium)
    } else if days_left <= 90 {
        (30.0 + (90 - days_left) as f64 * 0.33, UrgencyBand::Low)
    } else {
        // Exponential decay beyond the planning horizon, floored at 10.
        (
            (100.0 * (-(days_left as f64) / 200.0).exp()).max(10.0),
            UrgencyBand::FuturePlanning,
        )
    }
}

fn activity(tier: ActivityTier, usage_count: u32) -> (f64, String) {
    let (base, reason) = tables::activity_base(tier);
    if usage_count >= 3 {
        ((base + 10.0).min(100.0), format!("{reason} - recurring service"))
    } else {
        (base, reason.to_string())
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
