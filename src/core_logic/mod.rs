pub mod aggregation;
pub mod data_processing;
