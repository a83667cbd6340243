pub mod models;
pub mod shaping;
