use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::engine::domain::{
    PriorityBreakdown, PriorityLevel, RecommendationResult, RecommendationStatus, ScoreBreakdown,
    ScoreSummary, ServiceRecord, SmsAlert, UserProfile,
};
use crate::engine::scoring::{round2, PriorityScorer, Weights};

/// Ranked list length when the caller does not ask for a specific cut.
pub const DEFAULT_TOP_N: usize = 5;

const ACTION_LINK_BASE: &str = "https://absher.sa/service";
const DEFAULT_CONTACT_PHONE: &str = "+966500000000";
const FALLBACK_ALERT_REASON: &str = "Action required";

/// Scores a whole service roster for one user, ranks it, and derives the
/// alert messages and summary statistics for the aggregate result.
pub struct Recommender {
    scorer: PriorityScorer,
}

impl Recommender {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            scorer: PriorityScorer::new(today),
        }
    }

    pub fn weights(&self) -> Weights {
        self.scorer.weights()
    }

    /// Score, rank, and summarize. A service that fails scoring is logged
    /// and skipped; the rest of the roster still produces a result.
    pub fn recommend(
        &self,
        user: &UserProfile,
        services: &[ServiceRecord],
        top_n: usize,
    ) -> RecommendationResult {
        let generated_at = Utc::now();

        if services.is_empty() {
            return RecommendationResult {
                status: RecommendationStatus::NoServices,
                user_id: user.id,
                user_name: user.name.clone(),
                total_services: 0,
                recommendations: Vec::new(),
                top_recommendation: None,
                sms_alerts: Vec::new(),
                summary: None,
                generated_at,
            };
        }

        let mut scored = Vec::with_capacity(services.len());
        for service in services {
            match self.scorer.try_score(service, user) {
                Ok(breakdown) => scored.push(breakdown),
                Err(err) => {
                    warn!(service_id = service.service_id, error = %err, "skipping unscorable service");
                }
            }
        }

        // Stable sort: ties keep their input order, no secondary key.
        scored.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let summary = summarize(&scored);
        let mut recommendations = scored;
        recommendations.truncate(top_n);
        let top_recommendation = recommendations.first().cloned();
        let sms_alerts = build_alerts(&recommendations, user);

        RecommendationResult {
            status: RecommendationStatus::Success,
            user_id: user.id,
            user_name: user.name.clone(),
            total_services: services.len(),
            recommendations,
            top_recommendation,
            sms_alerts,
            summary,
            generated_at,
        }
    }
}

/// One alert per critical or high recommendation; medium and low never
/// notify. Messages are composed here but never transmitted.
fn build_alerts(recommendations: &[ScoreBreakdown], user: &UserProfile) -> Vec<SmsAlert> {
    let phone = user
        .phone
        .clone()
        .unwrap_or_else(|| DEFAULT_CONTACT_PHONE.to_string());

    let mut alerts = Vec::new();
    for rec in recommendations {
        let urgency_word = match rec.priority_level {
            PriorityLevel::Critical => "URGENT",
            PriorityLevel::High => "IMPORTANT",
            PriorityLevel::Medium | PriorityLevel::Low => continue,
        };

        let action_link = format!("{ACTION_LINK_BASE}/{}", rec.service_id);
        let lead_reason = rec
            .reasons
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_ALERT_REASON);
        let message = format!(
            "[{urgency_word}] {}\n{lead_reason}\nComplete the process now: {action_link}",
            rec.service_name
        );

        alerts.push(SmsAlert {
            service_id: rec.service_id,
            service_name: rec.service_name.clone(),
            priority: rec.priority_level,
            message,
            action_link,
            phone: phone.clone(),
        });
    }

    alerts
}

fn summarize(scored: &[ScoreBreakdown]) -> Option<ScoreSummary> {
    if scored.is_empty() {
        return None;
    }

    let mut priority_breakdown = PriorityBreakdown::default();
    for breakdown in scored {
        priority_breakdown.record(breakdown.priority_level);
    }

    let urgent_services = scored.iter().filter(|b| b.days_left <= 30).count();
    let score_total: f64 = scored.iter().map(|b| b.final_score).sum();

    Some(ScoreSummary {
        total_services: scored.len(),
        urgent_services,
        priority_breakdown,
        average_score: round2(score_total / scored.len() as f64),
    })
}
