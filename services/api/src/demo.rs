use crate::infra::parse_date;
use chrono::{Local, NaiveDate};
use civic_priority::engine::{
    RecommendationResult, Recommender, ServiceRecord, UserProfile, DEFAULT_TOP_N,
};
use civic_priority::error::AppError;
use civic_priority::intake::ServiceRosterImporter;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// CSV roster of pending services to score
    #[arg(long)]
    pub(crate) services_csv: PathBuf,
    /// Citizen identifier for the run
    #[arg(long, default_value_t = 1)]
    pub(crate) user_id: u64,
    /// Citizen display name
    #[arg(long, default_value = "CLI User")]
    pub(crate) user_name: String,
    /// Activity level (high/medium/low/inactive)
    #[arg(long)]
    pub(crate) activity_level: Option<String>,
    /// Contact phone for composed alerts
    #[arg(long)]
    pub(crate) phone: Option<String>,
    /// Ranked list length
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub(crate) top_n: usize,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Ranked list length
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub(crate) top_n: usize,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        services_csv,
        user_id,
        user_name,
        activity_level,
        phone,
        top_n,
        today,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let services = ServiceRosterImporter::from_path(services_csv)?;
    let user = UserProfile {
        id: user_id,
        name: user_name,
        activity_level,
        phone,
    };

    let result = Recommender::new(today).recommend(&user, &services, top_n.max(1));
    render_recommendations(&result, today);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, top_n } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Civic priority engine demo");

    let user = demo_citizen();
    let services = demo_roster();
    let result = Recommender::new(today).recommend(&user, &services, top_n.max(1));
    render_recommendations(&result, today);

    Ok(())
}

fn demo_citizen() -> UserProfile {
    UserProfile {
        id: 1,
        name: "Reem AlHarbi".to_string(),
        activity_level: Some("high".to_string()),
        phone: Some("+966500000000".to_string()),
    }
}

fn demo_roster() -> Vec<ServiceRecord> {
    vec![
        ServiceRecord {
            service_id: 101,
            name: "Passport Renewal".to_string(),
            category: "travel".to_string(),
            days_left: 28,
            usage_count: 4,
            seasonality: Some("in_season".to_string()),
            expiry_date: Some("2026-01-25".to_string()),
        },
        ServiceRecord {
            service_id: 102,
            name: "Vehicle Inspection".to_string(),
            category: "vehicle".to_string(),
            days_left: 72,
            usage_count: 2,
            seasonality: Some("out_of_season".to_string()),
            expiry_date: Some("2026-03-14".to_string()),
        },
        ServiceRecord {
            service_id: 103,
            name: "National ID Renewal".to_string(),
            category: "identity".to_string(),
            days_left: 150,
            usage_count: 1,
            seasonality: Some("out_of_season".to_string()),
            expiry_date: Some("2026-06-09".to_string()),
        },
    ]
}

fn render_recommendations(result: &RecommendationResult, today: NaiveDate) {
    println!(
        "User: {} (id {}) | evaluated {} | status {}",
        result.user_name,
        result.user_id,
        today,
        result.status.label()
    );
    println!("Total services: {}", result.total_services);

    if let Some(top) = &result.top_recommendation {
        println!("\nTop recommendation");
        println!(
            "- {} | score {}/100 | priority {} | {} days left",
            top.service_name,
            top.final_score,
            top.priority_level.label(),
            top.days_left
        );
        for reason in &top.reasons {
            println!("  - {}", reason);
        }
    }

    if !result.recommendations.is_empty() {
        println!("\nRanked recommendations");
        for (rank, rec) in result.recommendations.iter().enumerate() {
            println!(
                "{}. {} | score {}/100 | priority {} | {} days left",
                rank + 1,
                rec.service_name,
                rec.final_score,
                rec.priority_level.label(),
                rec.days_left
            );
        }
    }

    if result.sms_alerts.is_empty() {
        println!("\nAlerts: none composed");
    } else {
        println!("\nAlerts ({} ready to send)", result.sms_alerts.len());
        for alert in &result.sms_alerts {
            println!(
                "- {} ({}) -> {}",
                alert.service_name,
                alert.priority.label(),
                alert.phone
            );
            for line in alert.message.lines() {
                println!("    {}", line);
            }
        }
    }

    if let Some(summary) = &result.summary {
        println!("\nSummary");
        println!(
            "- {} scored | {} due within 30 days | average score {}",
            summary.total_services, summary.urgent_services, summary.average_score
        );
        println!(
            "- priority breakdown: critical {}, high {}, medium {}, low {}",
            summary.priority_breakdown.critical,
            summary.priority_breakdown.high,
            summary.priority_breakdown.medium,
            summary.priority_breakdown.low
        );
    }
}
