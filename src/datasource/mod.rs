pub mod models;
pub mod reader;

pub use models::RentalRecord;
pub use reader::read_rentals;
