use chrono::{Duration, NaiveDate};
use polars::prelude::*;

use crate::datasource::RentalRecord;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
}

fn days_since_epoch(date: NaiveDate) -> i64 {
    date.signed_duration_since(epoch()).num_days()
}

/// Inverse of the physical representation of a `DataType::Date` column.
pub fn date_from_days(days: i32) -> NaiveDate {
    epoch() + Duration::days(days as i64)
}

/// Build the normalized table: rows sorted ascending by date, with a
/// `recency` column holding whole days between each row's date and the
/// newest date in the entire dataset. Recency is fixed here, at load time,
/// so range filtering later on never shifts it.
///
/// An empty record set is rejected: without any dates the range bounds of
/// the dashboard are undefined.
pub fn normalize(mut records: Vec<RentalRecord>) -> PolarsResult<DataFrame> {
    let newest = records.iter().map(|r| r.date).max().ok_or_else(|| {
        PolarsError::NoData("rental table has no rows; date-range bounds are undefined".into())
    })?;
    records.sort_by_key(|r| r.date);
    records_to_dataframe(&records, newest)
}

fn records_to_dataframe(records: &[RentalRecord], newest: NaiveDate) -> PolarsResult<DataFrame> {
    let date_series = Series::new(
        "date",
        records
            .iter()
            .map(|r| days_since_epoch(r.date))
            .collect::<Vec<i64>>(),
    );

    DataFrame::new(vec![
        date_series.cast(&DataType::Date)?,
        Series::new(
            "season",
            records.iter().map(|r| r.season).collect::<Vec<i32>>(),
        ),
        Series::new(
            "month",
            records.iter().map(|r| r.month).collect::<Vec<i32>>(),
        ),
        Series::new(
            "workingday",
            records.iter().map(|r| r.workingday).collect::<Vec<i32>>(),
        ),
        Series::new(
            "weathersit",
            records.iter().map(|r| r.weathersit).collect::<Vec<i32>>(),
        ),
        Series::new(
            "casual",
            records.iter().map(|r| r.casual).collect::<Vec<i64>>(),
        ),
        Series::new(
            "registered",
            records.iter().map(|r| r.registered).collect::<Vec<i64>>(),
        ),
        Series::new("cnt", records.iter().map(|r| r.cnt).collect::<Vec<i64>>()),
        Series::new(
            "recency",
            records
                .iter()
                .map(|r| newest.signed_duration_since(r.date).num_days())
                .collect::<Vec<i64>>(),
        ),
    ])
}

/// Oldest and newest date of the loaded table, used to bound the range
/// widget and as the default selection.
pub fn date_span(df: &DataFrame) -> PolarsResult<(NaiveDate, NaiveDate)> {
    let dates = df.column("date")?.date()?;
    let min = dates
        .min()
        .ok_or_else(|| PolarsError::NoData("date column is empty".into()))?;
    let max = dates
        .max()
        .ok_or_else(|| PolarsError::NoData("date column is empty".into()))?;
    Ok((date_from_days(min), date_from_days(max)))
}

/// Rows whose date falls inside `[start, end]`, inclusive on both ends.
/// A swapped or non-intersecting range selects nothing rather than erring.
pub fn filter_date_range(
    df: &DataFrame,
    start: NaiveDate,
    end: NaiveDate,
) -> PolarsResult<DataFrame> {
    let start = lit(days_since_epoch(start) as i32).cast(DataType::Date);
    let end = lit(days_since_epoch(end) as i32).cast(DataType::Date);

    df.clone()
        .lazy()
        .filter(col("date").gt_eq(start).and(col("date").lt_eq(end)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        date: NaiveDate,
        season: i32,
        month: i32,
        workingday: i32,
        weathersit: i32,
        casual: i64,
        registered: i64,
    ) -> RentalRecord {
        RentalRecord {
            date,
            season,
            month,
            workingday,
            weathersit,
            casual,
            registered,
            cnt: casual + registered,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_records() -> Vec<RentalRecord> {
        // Deliberately out of order to exercise the sort.
        vec![
            record(date(2011, 4, 5), 2, 4, 1, 1, 120, 480),
            record(date(2011, 1, 1), 1, 1, 0, 1, 50, 200),
            record(date(2011, 1, 2), 1, 1, 1, 2, 10, 300),
        ]
    }

    #[test]
    fn test_normalize_sorts_by_date() {
        let df = normalize(sample_records()).unwrap();

        let expected_dates = Series::new(
            "date",
            vec![
                NaiveDate::from_ymd_opt(2011, 1, 1),
                NaiveDate::from_ymd_opt(2011, 1, 2),
                NaiveDate::from_ymd_opt(2011, 4, 5),
            ],
        );
        assert_eq!(df.column("date").unwrap(), &expected_dates);
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_normalize_derives_recency_against_global_max() {
        let df = normalize(sample_records()).unwrap();

        let expected = Series::new("recency", vec![94i64, 93, 0]);
        assert_eq!(df.column("recency").unwrap(), &expected);

        let recency = df.column("recency").unwrap().i64().unwrap();
        assert!(recency.into_no_null_iter().all(|days| days >= 0));
    }

    #[test]
    fn test_normalize_empty_table_is_an_error() {
        assert!(normalize(Vec::new()).is_err());
    }

    #[test]
    fn test_date_span() {
        let df = normalize(sample_records()).unwrap();
        let (min, max) = date_span(&df).unwrap();
        assert_eq!(min, date(2011, 1, 1));
        assert_eq!(max, date(2011, 4, 5));
    }

    #[test]
    fn test_filter_is_inclusive_on_both_ends() {
        let df = normalize(sample_records()).unwrap();
        let filtered = filter_date_range(&df, date(2011, 1, 2), date(2011, 4, 5)).unwrap();

        let expected_dates = Series::new(
            "date",
            vec![
                NaiveDate::from_ymd_opt(2011, 1, 2),
                NaiveDate::from_ymd_opt(2011, 4, 5),
            ],
        );
        assert_eq!(filtered.column("date").unwrap(), &expected_dates);
    }

    #[test]
    fn test_filter_partition_is_exact() {
        // Every row lands inside or outside the window, never both.
        let df = normalize(sample_records()).unwrap();
        let filtered = filter_date_range(&df, date(2011, 1, 1), date(2011, 1, 2)).unwrap();
        assert_eq!(filtered.height(), 2);

        let dates = filtered.column("date").unwrap().date().unwrap();
        for days in dates.into_no_null_iter() {
            let d = date_from_days(days);
            assert!(d >= date(2011, 1, 1) && d <= date(2011, 1, 2));
        }
    }

    #[test]
    fn test_filter_swapped_bounds_select_nothing() {
        let df = normalize(sample_records()).unwrap();
        let filtered = filter_date_range(&df, date(2011, 4, 5), date(2011, 1, 1)).unwrap();
        assert_eq!(filtered.height(), 0);
    }

    #[test]
    fn test_filter_disjoint_range_selects_nothing() {
        let df = normalize(sample_records()).unwrap();
        let filtered = filter_date_range(&df, date(2015, 1, 1), date(2015, 12, 31)).unwrap();
        assert_eq!(filtered.height(), 0);
    }

    #[test]
    fn test_recency_is_unchanged_by_filtering() {
        let df = normalize(sample_records()).unwrap();
        let filtered = filter_date_range(&df, date(2011, 1, 1), date(2011, 1, 2)).unwrap();

        let expected = Series::new("recency", vec![94i64, 93]);
        assert_eq!(filtered.column("recency").unwrap(), &expected);
    }
}
