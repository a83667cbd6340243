//! Computation core of a bike-share rental dashboard.
//!
//! The pipeline is a pure-function chain: load and normalize the daily
//! rental table once, filter it to a date range per interaction, and
//! recompute a fixed set of descriptive-statistics tables plus two headline
//! scalars. Chart rendering stays outside this crate; consumers receive
//! small, fully-shaped tabular results.

pub mod api;
pub mod core_logic;
pub mod datasource;
