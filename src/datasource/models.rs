use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the cleaned bike-share table. Field names map the CSV headers
/// of the source dataset; columns the dashboard never reads (temperature,
/// humidity, ...) are simply not listed and get skipped by the reader.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RentalRecord {
    #[serde(rename = "dteday")]
    pub date: NaiveDate,
    pub season: i32, // categorical code 1-4
    #[serde(rename = "mnth")]
    pub month: i32, // 1-12
    pub workingday: i32, // 0 or 1
    pub weathersit: i32, // categorical weather code
    pub casual: i64,
    pub registered: i64,
    pub cnt: i64, // casual + registered, assumed true of the input
}
