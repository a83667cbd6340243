use std::path::Path;

use crate::datasource::models::RentalRecord;

/// Read the whole rental table into memory. Any IO failure, or a row whose
/// date column does not parse as a calendar date, is a fatal load error:
/// the dashboard never starts on a partial table.
pub fn read_rentals<P: AsRef<Path>>(path: P) -> Result<Vec<RentalRecord>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    reader.deserialize().collect()
}
