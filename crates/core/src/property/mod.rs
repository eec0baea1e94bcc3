//! Read-only view of listed properties.
//!
//! Bookings only need a property's price, capacity, owner and status; the
//! catalog trait is the seam the database layer implements.

pub mod catalog;
pub mod types;

pub use catalog::PropertyCatalog;
pub use types::{Property, PropertyStatus};
