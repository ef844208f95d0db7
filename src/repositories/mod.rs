pub mod bookings;
pub mod events;
pub mod users;

pub use bookings::BookingLedger;
pub use events::EventCatalog;
pub use users::UserDirectory;
