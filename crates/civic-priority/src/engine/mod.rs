//! Multi-factor scoring and ranking for pending government services.
//!
//! Two collaborators, evaluated leaf-first: [`scoring::PriorityScorer`]
//! turns one service record into a [`domain::ScoreBreakdown`], and
//! [`recommender::Recommender`] scores a whole roster, ranks it, and
//! derives alerts plus summary statistics.

pub mod domain;
pub mod recommender;
pub mod scoring;

pub use domain::{
    ActivityTier, PriorityBreakdown, PriorityLevel, RecommendationResult, RecommendationStatus,
    ScoreBreakdown, ScoreSummary, SeasonalityFlag, ServiceCategory, ServiceRecord, SmsAlert,
    UrgencyBand, UserProfile,
};
pub use recommender::{Recommender, DEFAULT_TOP_N};
pub use scoring::{PriorityScorer, ScoreError, Weights};
