use polars::prelude::*;

use crate::api::models::{
    DailyRental, DashboardData, MonthlyTotalRow, PeakDayMetric, SeasonalDemandRow, SeasonalRfmRow,
    UserTypeTotalRow, WeatherStatsRow, WorkingDayStatsRow,
};
use crate::core_logic::aggregation::DashboardTables;
use crate::core_logic::data_processing::date_from_days;

/// User-visible empty state of the monthly chart.
pub const EMPTY_RANGE_MESSAGE: &str = "no data for selected range";

/// Shape the aggregate tables into the serializable dashboard payload.
pub fn build_response(tables: &DashboardTables) -> PolarsResult<DashboardData> {
    let monthly_totals = monthly_rows(&tables.monthly_totals)?;
    let monthly_message = if monthly_totals.is_empty() {
        Some(EMPTY_RANGE_MESSAGE.to_string())
    } else {
        None
    };

    Ok(DashboardData {
        total_rentals: tables.total_rentals,
        peak: tables.peak.as_ref().map(|peak| PeakDayMetric {
            date: peak.date,
            cnt: peak.cnt,
        }),
        daily: daily_rows(&tables.daily)?,
        seasonal_demand: seasonal_rows(&tables.seasonal_demand)?,
        working_day_stats: working_day_rows(&tables.working_day_stats)?,
        user_type_totals: user_type_rows(&tables.user_type_totals)?,
        monthly_totals,
        monthly_message,
        weather_stats: weather_rows(&tables.weather_stats)?,
        seasonal_rfm: rfm_rows(&tables.seasonal_rfm)?,
    })
}

fn daily_rows(df: &DataFrame) -> PolarsResult<Vec<DailyRental>> {
    let dates = df.column("date")?.date()?;
    let cnt = df.column("cnt")?.i64()?;

    Ok(dates
        .into_iter()
        .zip(cnt)
        .filter_map(|(days, cnt)| match (days, cnt) {
            (Some(days), Some(cnt)) => Some(DailyRental {
                date: date_from_days(days),
                cnt,
            }),
            _ => None,
        })
        .collect())
}

fn seasonal_rows(df: &DataFrame) -> PolarsResult<Vec<SeasonalDemandRow>> {
    let season = df.column("season")?.str()?;
    let average = df.column("average_rentals")?.f64()?;

    Ok(season
        .into_iter()
        .zip(average)
        .map(|(season, average_rentals)| SeasonalDemandRow {
            season: season.unwrap_or_default().to_string(),
            average_rentals: average_rentals.unwrap_or_default(),
        })
        .collect())
}

fn working_day_rows(df: &DataFrame) -> PolarsResult<Vec<WorkingDayStatsRow>> {
    let workingday = df.column("workingday")?.i32()?;
    let cnt_max = df.column("cnt_max")?.i64()?;
    let cnt_min = df.column("cnt_min")?.i64()?;
    let cnt_mean = df.column("cnt_mean")?.f64()?;
    let cnt_std = df.column("cnt_std")?.f64()?;
    let cnt_median = df.column("cnt_median")?.f64()?;
    let cnt_sum = df.column("cnt_sum")?.i64()?;
    let cnt_count = df.column("cnt_count")?.i64()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(WorkingDayStatsRow {
            workingday: workingday.get(i).unwrap_or_default(),
            cnt_max: cnt_max.get(i).unwrap_or_default(),
            cnt_min: cnt_min.get(i).unwrap_or_default(),
            cnt_mean: cnt_mean.get(i).unwrap_or_default(),
            cnt_std: cnt_std.get(i),
            cnt_median: cnt_median.get(i).unwrap_or_default(),
            cnt_sum: cnt_sum.get(i).unwrap_or_default(),
            cnt_count: cnt_count.get(i).unwrap_or_default(),
        });
    }
    Ok(rows)
}

fn user_type_rows(df: &DataFrame) -> PolarsResult<Vec<UserTypeTotalRow>> {
    let user_type = df.column("user_type")?.str()?;
    let total = df.column("total")?.i64()?;

    Ok(user_type
        .into_iter()
        .zip(total)
        .map(|(user_type, total)| UserTypeTotalRow {
            user_type: user_type.unwrap_or_default().to_string(),
            total: total.unwrap_or_default(),
        })
        .collect())
}

fn monthly_rows(df: &DataFrame) -> PolarsResult<Vec<MonthlyTotalRow>> {
    let month = df.column("month")?.str()?;
    let label = df.column("label")?.str()?;
    let total_rentals = df.column("total_rentals")?.i64()?;
    let percentage = df.column("percentage")?.f64()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(MonthlyTotalRow {
            month: month.get(i).unwrap_or_default().to_string(),
            label: label.get(i).unwrap_or_default().to_string(),
            total_rentals: total_rentals.get(i).unwrap_or_default(),
            percentage: percentage.get(i).unwrap_or_default(),
        });
    }
    Ok(rows)
}

fn weather_rows(df: &DataFrame) -> PolarsResult<Vec<WeatherStatsRow>> {
    let weathersit = df.column("weathersit")?.i32()?;
    let cnt_mean = df.column("cnt_mean")?.f64()?;
    let cnt_sum = df.column("cnt_sum")?.i64()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(WeatherStatsRow {
            weathersit: weathersit.get(i).unwrap_or_default(),
            cnt_mean: cnt_mean.get(i).unwrap_or_default(),
            cnt_sum: cnt_sum.get(i).unwrap_or_default(),
        });
    }
    Ok(rows)
}

fn rfm_rows(df: &DataFrame) -> PolarsResult<Vec<SeasonalRfmRow>> {
    let season = df.column("season")?.i32()?;
    let recency = df.column("recency")?.f64()?;
    let frequency = df.column("frequency")?.i64()?;
    let monetary = df.column("monetary")?.i64()?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(SeasonalRfmRow {
            season: season.get(i).unwrap_or_default(),
            recency: recency.get(i).unwrap_or_default(),
            frequency: frequency.get(i).unwrap_or_default(),
            monetary: monetary.get(i).unwrap_or_default(),
        });
    }
    Ok(rows)
}
