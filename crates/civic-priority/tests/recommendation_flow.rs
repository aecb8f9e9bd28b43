use chrono::NaiveDate;
use civic_priority::engine::{
    PriorityLevel, RecommendationStatus, Recommender, ServiceRecord, UserProfile, Weights,
    DEFAULT_TOP_N,
};
use civic_priority::intake::ServiceRosterImporter;
use std::io::Cursor;

fn evaluation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 18).expect("valid date")
}

fn citizen() -> UserProfile {
    UserProfile {
        id: 1,
        name: "Reem AlHarbi".to_string(),
        activity_level: Some("high".to_string()),
        phone: Some("+966500000000".to_string()),
    }
}

fn pending_services() -> Vec<ServiceRecord> {
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

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[test]
fn full_run_ranks_alerts_and_summarizes() {
    let recommender = Recommender::new(evaluation_date());
    let result = recommender.recommend(&citizen(), &pending_services(), DEFAULT_TOP_N);

    assert_eq!(result.status, RecommendationStatus::Success);
    assert_eq!(result.user_id, 1);
    assert_eq!(result.user_name, "Reem AlHarbi");
    assert_eq!(result.total_services, 3);

    // Expected finals from the piecewise formulas and the fixed weights.
    let weights = Weights::standard();
    let passport_final = round2(
        71.0 * weights.urgency
            + 90.0 * weights.seasonality
            + 90.0 * weights.importance
            + 100.0 * weights.activity,
    );
    let vehicle_urgency = 30.0 + (90.0 - 72.0) * 0.33;
    let vehicle_final = round2(
        vehicle_urgency * weights.urgency
            + 50.0 * weights.seasonality
            + 75.0 * weights.importance
            + 90.0 * weights.activity,
    );
    let id_urgency = 100.0 * (-150.0f64 / 200.0).exp();
    let id_final = round2(
        id_urgency * weights.urgency
            + 50.0 * weights.seasonality
            + 95.0 * weights.importance
            + 90.0 * weights.activity,
    );

    assert_eq!(result.recommendations.len(), 3);
    let ranked: Vec<(u64, f64)> = result
        .recommendations
        .iter()
        .map(|rec| (rec.service_id, rec.final_score))
        .collect();
    assert_eq!(ranked[0].0, 101);
    assert!((ranked[0].1 - passport_final).abs() < 1e-9);
    assert!((passport_final - 83.9).abs() < 1e-9);
    assert_eq!(ranked[1].0, 103);
    assert!((ranked[1].1 - id_final).abs() < 1e-9);
    assert_eq!(ranked[2].0, 102);
    assert!((ranked[2].1 - vehicle_final).abs() < 1e-9);

    let top = result.top_recommendation.as_ref().expect("top pick");
    assert_eq!(top.service_id, 101);
    assert_eq!(top.priority_level, PriorityLevel::Critical);

    // Only the critical passport renewal produces an alert.
    assert_eq!(result.sms_alerts.len(), 1);
    let alert = &result.sms_alerts[0];
    assert_eq!(alert.service_name, "Passport Renewal");
    assert_eq!(alert.action_link, "https://absher.sa/service/101");
    assert_eq!(alert.phone, "+966500000000");

    let summary = result.summary.as_ref().expect("summary");
    assert_eq!(summary.total_services, 3);
    assert_eq!(summary.urgent_services, 1);
    assert_eq!(summary.priority_breakdown.total() as usize, 3);
    let expected_average = round2((passport_final + vehicle_final + id_final) / 3.0);
    assert!((summary.average_score - expected_average).abs() < 1e-9);
}

#[test]
fn ranked_list_never_exceeds_requested_or_available() {
    let recommender = Recommender::new(evaluation_date());
    let services = pending_services();

    for top_n in 1..=6 {
        let result = recommender.recommend(&citizen(), &services, top_n);
        assert!(result.recommendations.len() <= top_n);
        assert!(result.recommendations.len() <= services.len());
        assert!(result.sms_alerts.len() <= result.recommendations.len());
    }
}

#[test]
fn empty_roster_short_circuits_regardless_of_user() {
    let recommender = Recommender::new(evaluation_date());
    for activity in [None, Some("high"), Some("nonsense")] {
        let user = UserProfile {
            id: 9,
            name: "Anyone".to_string(),
            activity_level: activity.map(str::to_string),
            phone: None,
        };
        let result = recommender.recommend(&user, &[], DEFAULT_TOP_N);
        assert_eq!(result.status, RecommendationStatus::NoServices);
        assert!(result.recommendations.is_empty());
        assert!(result.summary.is_none());
    }
}

#[test]
fn csv_roster_feeds_straight_into_the_recommender() {
    let csv = "Service ID,Name,Category,Days Left,Usage Count,Seasonality,Expiry Date\n\
               101,Passport Renewal,travel,28,4,in_season,2026-01-25\n\
               102,Vehicle Inspection,vehicle,72,2,out_of_season,2026-03-14\n\
               103,National ID Renewal,identity,150,1,out_of_season,2026-06-09\n";
    let services =
        ServiceRosterImporter::from_reader(Cursor::new(csv)).expect("roster imports");
    assert_eq!(services.len(), 3);

    let recommender = Recommender::new(evaluation_date());
    let result = recommender.recommend(&citizen(), &services, DEFAULT_TOP_N);
    assert_eq!(result.status, RecommendationStatus::Success);
    assert_eq!(result.recommendations[0].service_id, 101);
}

#[test]
fn malformed_fields_degrade_to_defaults_instead_of_failing() {
    let weird = ServiceRecord {
        service_id: 900,
        name: "Mystery Permit".to_string(),
        category: "CRYPTO_WIZARDRY".to_string(),
        days_left: -10,
        usage_count: 0,
        seasonality: Some("whenever".to_string()),
        expiry_date: None,
    };
    let user = UserProfile {
        id: 2,
        name: "Ghadeer Sameer".to_string(),
        activity_level: Some("unknown_tier".to_string()),
        phone: None,
    };

    let recommender = Recommender::new(evaluation_date());
    let result = recommender.recommend(&user, &[weird], DEFAULT_TOP_N);

    assert_eq!(result.recommendations.len(), 1);
    let breakdown = &result.recommendations[0];
    // Expired -> urgency 100; unknown category -> default tables; unknown
    // activity -> neutral 60; unknown flag -> pattern table (default 60).
    assert_eq!(breakdown.components.urgency.score, 100.0);
    assert_eq!(breakdown.components.seasonality.score, 60.0);
    assert_eq!(breakdown.components.importance.score, 60.0);
    assert_eq!(breakdown.components.activity.score, 60.0);
}
