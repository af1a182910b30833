pub mod a1;
pub mod client;
mod error;
pub mod grid;
pub mod layout;

pub use client::SheetsClient;
pub use error::SheetsError;
pub use grid::MonthGrid;
