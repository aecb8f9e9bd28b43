use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Citizen profile supplied by the transport layer. Never mutated by scoring.
///
/// `activity_level` and `phone` stay free-text on the wire; unknown or
/// missing values fall back to documented defaults during scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

fn default_days_left() -> i64 {
    365
}

/// One pending obligation for a citizen, as reported by the service registry.
///
/// `days_left` may be zero or negative for services that already expired.
/// `category` and `seasonality` are free-text and normalized by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub service_id: u64,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_days_left")]
    pub days_left: i64,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default)]
    pub seasonality: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
}

/// Closed set of service categories the scoring tables know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Identity,
    Civil,
    Passport,
    Travel,
    DrivingLicense,
    Vehicle,
    Health,
    Education,
    Business,
    Housing,
    Other,
}

impl ServiceCategory {
    /// Case-insensitive mapping from the registry's free-text category.
    /// Anything unrecognized lands in the general bucket.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "identity" => Self::Identity,
            "civil" => Self::Civil,
            "passport" => Self::Passport,
            "travel" => Self::Travel,
            "driving_license" => Self::DrivingLicense,
            "vehicle" => Self::Vehicle,
            "health" => Self::Health,
            "education" => Self::Education,
            "business" => Self::Business,
            "housing" => Self::Housing,
            _ => Self::Other,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Civil => "civil",
            Self::Passport => "passport",
            Self::Travel => "travel",
            Self::DrivingLicense => "driving_license",
            Self::Vehicle => "vehicle",
            Self::Health => "health",
            Self::Education => "education",
            Self::Business => "business",
            Self::Housing => "housing",
            Self::Other => "other",
        }
    }
}

/// Engagement tier derived from the user's free-text activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityTier {
    High,
    Medium,
    Low,
    Inactive,
    Unspecified,
}

impl ActivityTier {
    /// Missing level defaults to medium; an unrecognized string keeps its
    /// own tier so scoring can apply the neutral fallback.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Medium,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "high" => Self::High,
                "medium" => Self::Medium,
                "low" => Self::Low,
                "inactive" => Self::Inactive,
                _ => Self::Unspecified,
            },
        }
    }
}

/// Pre-computed seasonality flag attached to a service record by upstream
/// analytics. Absent or unrecognized flags fall through to the per-category
/// pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalityFlag {
    InSeason,
    OutOfSeason,
}

impl SeasonalityFlag {
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "in_season" => Some(Self::InSeason),
            "out_of_season" => Some(Self::OutOfSeason),
            _ => None,
        }
    }
}

/// Discrete priority bucket derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// Step function over the composite score: >=80 critical, >=65 high,
    /// >=50 medium, else low.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Critical
        } else if score >= 65.0 {
            Self::High
        } else if score >= 50.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Qualitative band attached to the urgency component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyBand {
    ExpiredImmediate,
    VeryCritical,
    Critical,
    Important,
    Medium,
    Low,
    FuturePlanning,
}

impl UrgencyBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExpiredImmediate => "Expired - immediate action",
            Self::VeryCritical => "Very critical",
            Self::Critical => "Critical",
            Self::Important => "Important",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::FuturePlanning => "Future planning",
        }
    }
}

/// Urgency contribution with its qualitative band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgencyComponent {
    pub score: f64,
    pub band: UrgencyBand,
    pub weight: f64,
}

/// Contribution from one of the table-driven factors, with the table's
/// fixed explanation text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorComponent {
    pub score: f64,
    pub reason: String,
    pub weight: f64,
}

/// All four factor contributions behind a composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub urgency: UrgencyComponent,
    pub seasonality: FactorComponent,
    pub importance: FactorComponent,
    pub activity: FactorComponent,
}

/// Per-service scoring output. Created fresh on every call and never
/// mutated afterwards; the ranked list order is the rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub service_id: u64,
    pub service_name: String,
    pub final_score: f64,
    pub priority_level: PriorityLevel,
    pub components: ComponentScores,
    pub reasons: Vec<String>,
    pub days_left: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

/// Ready-to-send notification for a critical or high priority service.
/// Composition only; nothing is actually dispatched by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsAlert {
    pub service_id: u64,
    pub service_name: String,
    pub priority: PriorityLevel,
    pub message: String,
    pub action_link: String,
    pub phone: String,
}

/// Counts per priority bucket. All four buckets serialize even when zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl PriorityBreakdown {
    pub fn record(&mut self, level: PriorityLevel) {
        match level {
            PriorityLevel::Critical => self.critical += 1,
            PriorityLevel::High => self.high += 1,
            PriorityLevel::Medium => self.medium += 1,
            PriorityLevel::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low
    }
}

/// Statistics over the full scored set, not just the truncated top list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total_services: usize,
    pub urgent_services: usize,
    pub priority_breakdown: PriorityBreakdown,
    pub average_score: f64,
}

/// Two-phase status tag: either there was nothing to score, or the run
/// succeeded (possibly with individual services skipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    NoServices,
    Success,
}

impl RecommendationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoServices => "no_services",
            Self::Success => "success",
        }
    }
}

/// Aggregate result for one recommendation request.
///
/// Invariants: `recommendations.len()` never exceeds the requested top-n
/// nor the number of successfully scored services, and
/// `top_recommendation` equals the first ranked entry when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub status: RecommendationStatus,
    pub user_id: u64,
    pub user_name: String,
    pub total_services: usize,
    pub recommendations: Vec<ScoreBreakdown>,
    pub top_recommendation: Option<ScoreBreakdown>,
    pub sms_alerts: Vec<SmsAlert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ScoreSummary>,
    pub generated_at: DateTime<Utc>,
}
