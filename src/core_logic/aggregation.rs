use chrono::NaiveDate;
use polars::prelude::*;

use crate::core_logic::data_processing::date_from_days;

/// Display names for season codes 1-4, in fixed chart order.
pub const SEASON_LABELS: [&str; 4] = ["Spring", "Summer", "Fall", "Winter"];

/// Abbreviated display names for month codes 1-12.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn season_label(code: i32) -> String {
    match code {
        1..=4 => SEASON_LABELS[(code - 1) as usize].to_string(),
        other => other.to_string(),
    }
}

fn month_label(code: i32) -> String {
    match code {
        1..=12 => MONTH_LABELS[(code - 1) as usize].to_string(),
        other => other.to_string(),
    }
}

/// The single day with the most rentals inside the active range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeakDay {
    pub date: NaiveDate,
    pub cnt: i64,
}

/// Every output of one dashboard pass: the seven aggregate tables, the two
/// headline scalars, and the per-day series the time-series chart draws.
#[derive(Debug)]
pub struct DashboardTables {
    pub total_rentals: i64,
    pub peak: Option<PeakDay>,
    pub daily: DataFrame,
    pub seasonal_demand: DataFrame,
    pub working_day_stats: DataFrame,
    pub user_type_totals: DataFrame,
    pub monthly_totals: DataFrame,
    pub weather_stats: DataFrame,
    pub seasonal_rfm: DataFrame,
}

/// Run every aggregator in fixed order. All of them consume the filtered
/// table except the RFM summary, which always sees the full dataset.
pub fn compute_dashboard(filtered: &DataFrame, full: &DataFrame) -> PolarsResult<DashboardTables> {
    Ok(DashboardTables {
        total_rentals: total_rentals(filtered)?,
        peak: peak_day(filtered)?,
        daily: filtered.select(["date", "cnt"])?,
        seasonal_demand: seasonal_demand(filtered)?,
        working_day_stats: working_day_stats(filtered)?,
        user_type_totals: user_type_totals(filtered)?,
        monthly_totals: monthly_totals(filtered)?,
        weather_stats: weather_stats(filtered)?,
        seasonal_rfm: seasonal_rfm(full)?,
    })
}

/// Sum of `cnt` over the active range; zero when the range is empty.
pub fn total_rentals(df: &DataFrame) -> PolarsResult<i64> {
    Ok(df.column("cnt")?.i64()?.sum().unwrap_or(0))
}

/// Row with the maximum `cnt` in the active range, `None` when empty.
pub fn peak_day(df: &DataFrame) -> PolarsResult<Option<PeakDay>> {
    let cnt_series = df.column("cnt")?;
    let cnt = cnt_series.i64()?;
    let idx = match cnt_series.arg_max() {
        Some(idx) => idx,
        None => return Ok(None),
    };

    let days = df
        .column("date")?
        .date()?
        .get(idx)
        .ok_or_else(|| PolarsError::ComputeError("date column holds a null".into()))?;
    let peak_cnt = cnt
        .get(idx)
        .ok_or_else(|| PolarsError::ComputeError("cnt column holds a null".into()))?;

    Ok(Some(PeakDay {
        date: date_from_days(days),
        cnt: peak_cnt,
    }))
}

/// Mean rentals per season, relabeled to season names in code order.
/// Seasons absent from the range are absent from the output.
pub fn seasonal_demand(df: &DataFrame) -> PolarsResult<DataFrame> {
    let mut out = df
        .clone()
        .lazy()
        .group_by(vec![col("season")])
        .agg(vec![col("cnt").mean().alias("average_rentals")])
        .sort("season", Default::default())
        .collect()?;

    let labels: Vec<String> = out
        .column("season")?
        .i32()?
        .into_no_null_iter()
        .map(season_label)
        .collect();
    out.replace("season", Series::new("season", labels))?;

    Ok(out)
}

/// Descriptive statistics of `cnt` per working-day flag. A flag value with
/// no rows in the range is simply omitted, never zero-filled.
pub fn working_day_stats(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .group_by(vec![col("workingday")])
        .agg(vec![
            col("cnt").max().alias("cnt_max"),
            col("cnt").min().alias("cnt_min"),
            col("cnt").mean().alias("cnt_mean"),
            col("cnt").std(1).alias("cnt_std"),
            col("cnt").median().alias("cnt_median"),
            col("cnt").sum().alias("cnt_sum"),
            col("cnt").count().cast(DataType::Int64).alias("cnt_count"),
        ])
        .sort("workingday", Default::default())
        .collect()
}

/// Casual and registered column sums reshaped wide-to-long, one row per
/// user type. An empty range yields a zero-row table, matching the other
/// aggregators, rather than a pair of zero sums.
pub fn user_type_totals(df: &DataFrame) -> PolarsResult<DataFrame> {
    if df.height() == 0 {
        return DataFrame::new(vec![
            Series::new("user_type", Vec::<&str>::new()),
            Series::new("total", Vec::<i64>::new()),
        ]);
    }

    let casual = df.column("casual")?.i64()?.sum().unwrap_or(0);
    let registered = df.column("registered")?.i64()?.sum().unwrap_or(0);

    DataFrame::new(vec![
        Series::new("user_type", vec!["casual", "registered"]),
        Series::new("total", vec![casual, registered]),
    ])
}

/// Rental totals per month present in the range, with each month's share of
/// the range total. The percentage denominator covers only the months that
/// appear, so shares always close to 100. Month codes become zero-padded
/// labels ("01".."12") next to their abbreviated names.
pub fn monthly_totals(df: &DataFrame) -> PolarsResult<DataFrame> {
    let mut out = df
        .clone()
        .lazy()
        .group_by(vec![col("month")])
        .agg(vec![col("cnt").sum().alias("total_rentals")])
        .sort("month", Default::default())
        .with_column(
            (col("total_rentals").cast(DataType::Float64) * lit(100.0)
                / col("total_rentals").sum().cast(DataType::Float64))
            .alias("percentage"),
        )
        .collect()?;

    let codes: Vec<i32> = out.column("month")?.i32()?.into_no_null_iter().collect();
    out.replace(
        "month",
        Series::new(
            "month",
            codes
                .iter()
                .map(|code| format!("{code:02}"))
                .collect::<Vec<String>>(),
        ),
    )?;
    out.with_column(Series::new(
        "label",
        codes.into_iter().map(month_label).collect::<Vec<String>>(),
    ))?;

    out.select(["month", "label", "total_rentals", "percentage"])
}

/// Mean and sum of `cnt` per weather-situation code.
pub fn weather_stats(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .group_by(vec![col("weathersit")])
        .agg(vec![
            col("cnt").mean().alias("cnt_mean"),
            col("cnt").sum().alias("cnt_sum"),
        ])
        .sort("weathersit", Default::default())
        .collect()
}

/// Recency/frequency/monetary summary per season. Always computed over the
/// full table: the range widget never narrows a season's history.
pub fn seasonal_rfm(full: &DataFrame) -> PolarsResult<DataFrame> {
    full.clone()
        .lazy()
        .group_by(vec![col("season")])
        .agg(vec![
            col("recency").mean().alias("recency"),
            col("date")
                .n_unique()
                .cast(DataType::Int64)
                .alias("frequency"),
            col("cnt").sum().alias("monetary"),
        ])
        .sort("season", Default::default())
        .collect()
}
