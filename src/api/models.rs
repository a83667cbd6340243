use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query parameters of the dashboard route. Missing bounds default to the
/// full span of the loaded table.
#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct RangeParameters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Observed date span of the dataset, bounding the range widget.
#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct DateSpan {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakDayMetric {
    pub date: NaiveDate,
    pub cnt: i64,
}

/// One point of the per-day rentals line.
#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct DailyRental {
    pub date: NaiveDate,
    pub cnt: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SeasonalDemandRow {
    pub season: String,
    pub average_rentals: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WorkingDayStatsRow {
    pub workingday: i32,
    pub cnt_max: i64,
    pub cnt_min: i64,
    pub cnt_mean: f64,
    pub cnt_std: Option<f64>, // null for single-row groups
    pub cnt_median: f64,
    pub cnt_sum: i64,
    pub cnt_count: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UserTypeTotalRow {
    pub user_type: String,
    pub total: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct MonthlyTotalRow {
    pub month: String, // zero-padded code, "01".."12"
    pub label: String,
    pub total_rentals: i64,
    pub percentage: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WeatherStatsRow {
    pub weathersit: i32,
    pub cnt_mean: f64,
    pub cnt_sum: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SeasonalRfmRow {
    pub season: i32,
    pub recency: f64,
    pub frequency: i64,
    pub monetary: i64,
}

/// The full payload of one dashboard pass, ready for a rendering layer.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DashboardData {
    pub total_rentals: i64,
    pub peak: Option<PeakDayMetric>,
    pub daily: Vec<DailyRental>,
    pub seasonal_demand: Vec<SeasonalDemandRow>,
    pub working_day_stats: Vec<WorkingDayStatsRow>,
    pub user_type_totals: Vec<UserTypeTotalRow>,
    pub monthly_totals: Vec<MonthlyTotalRow>,
    /// Set when the monthly chart has nothing to draw for the selection.
    pub monthly_message: Option<String>,
    pub weather_stats: Vec<WeatherStatsRow>,
    pub seasonal_rfm: Vec<SeasonalRfmRow>,
}
