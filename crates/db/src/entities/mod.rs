//! `SeaORM` entity definitions.

pub mod bookings;
pub mod properties;
pub mod reviews;
pub mod sea_orm_active_enums;
pub mod users;

pub mod prelude {
    //! Entity re-exports.

    pub use super::bookings::Entity as Bookings;
    pub use super::properties::Entity as Properties;
    pub use super::reviews::Entity as Reviews;
    pub use super::users::Entity as Users;
}
