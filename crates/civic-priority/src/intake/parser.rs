use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::engine::domain::ServiceRecord;

const DEFAULT_DAYS_LEFT: i64 = 365;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ServiceRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<RosterRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Service ID")]
    service_id: u64,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(rename = "Days Left", default, deserialize_with = "empty_string_as_none")]
    days_left: Option<String>,
    #[serde(rename = "Usage Count", default, deserialize_with = "empty_string_as_none")]
    usage_count: Option<String>,
    #[serde(rename = "Seasonality", default, deserialize_with = "empty_string_as_none")]
    seasonality: Option<String>,
    #[serde(rename = "Expiry Date", default, deserialize_with = "empty_string_as_none")]
    expiry_date: Option<String>,
}

impl RosterRow {
    /// Blank or unparseable optional cells fall back to the same defaults
    /// the scorer documents, so a sparse export still scores cleanly.
    fn into_record(self) -> ServiceRecord {
        ServiceRecord {
            service_id: self.service_id,
            name: self.name,
            category: self.category.unwrap_or_default(),
            days_left: self
                .days_left
                .as_deref()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_DAYS_LEFT),
            usage_count: self
                .usage_count
                .as_deref()
                .and_then(|value| value.parse().ok())
                .unwrap_or(0),
            seasonality: self.seasonality,
            expiry_date: self.expiry_date,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
