pub mod booking;
pub mod event;
pub mod user;

pub use booking::Booking;
pub use event::{Event, NewEvent};
pub use user::{NewUser, User};
