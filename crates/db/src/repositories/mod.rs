//! Repository implementations of the core storage traits.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod booking;
mod error;
pub mod property;
pub mod review;
pub mod user;

pub use booking::BookingRepository;
pub use property::{CreatePropertyInput, PropertyRepository};
pub use review::ReviewRepository;
pub use user::UserRepository;
