pub mod config;
pub mod db;
pub mod models;
pub mod repositories;
pub mod utils;

pub use config::Config;
pub use repositories::{BookingLedger, EventCatalog, UserDirectory};
pub use utils::error::{AppError, AppResult};
