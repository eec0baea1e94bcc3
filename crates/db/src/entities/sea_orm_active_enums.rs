//! Native PostgreSQL enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use roomify_core::access::Role;
use roomify_core::booking::BookingStatus as DomainBookingStatus;
use roomify_core::property::PropertyStatus as DomainPropertyStatus;

/// `user_role` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    /// Books stays.
    #[sea_orm(string_value = "guest")]
    Guest,
    /// Lists properties.
    #[sea_orm(string_value = "host")]
    Host,
    /// Platform administrator.
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// `property_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "property_status")]
pub enum PropertyStatus {
    /// Bookable.
    #[sea_orm(string_value = "active")]
    Active,
    /// Delisted.
    #[sea_orm(string_value = "inactive")]
    Inactive,
    /// Awaiting listing review.
    #[sea_orm(string_value = "pending")]
    Pending,
}

/// `booking_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
pub enum BookingStatus {
    /// Requested.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Holds the dates.
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Called off.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    /// Stay took place.
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Guest => Self::Guest,
            Role::Host => Self::Host,
            Role::Admin => Self::Admin,
        }
    }
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Guest => Self::Guest,
            UserRole::Host => Self::Host,
            UserRole::Admin => Self::Admin,
        }
    }
}

impl From<DomainPropertyStatus> for PropertyStatus {
    fn from(status: DomainPropertyStatus) -> Self {
        match status {
            DomainPropertyStatus::Active => Self::Active,
            DomainPropertyStatus::Inactive => Self::Inactive,
            DomainPropertyStatus::Pending => Self::Pending,
        }
    }
}

impl From<PropertyStatus> for DomainPropertyStatus {
    fn from(status: PropertyStatus) -> Self {
        match status {
            PropertyStatus::Active => Self::Active,
            PropertyStatus::Inactive => Self::Inactive,
            PropertyStatus::Pending => Self::Pending,
        }
    }
}

impl From<DomainBookingStatus> for BookingStatus {
    fn from(status: DomainBookingStatus) -> Self {
        match status {
            DomainBookingStatus::Pending => Self::Pending,
            DomainBookingStatus::Confirmed => Self::Confirmed,
            DomainBookingStatus::Cancelled => Self::Cancelled,
            DomainBookingStatus::Completed => Self::Completed,
        }
    }
}

impl From<BookingStatus> for DomainBookingStatus {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Pending => Self::Pending,
            BookingStatus::Confirmed => Self::Confirmed,
            BookingStatus::Cancelled => Self::Cancelled,
            BookingStatus::Completed => Self::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_round_trips_through_db_enum() {
        for status in [
            DomainBookingStatus::Pending,
            DomainBookingStatus::Confirmed,
            DomainBookingStatus::Cancelled,
            DomainBookingStatus::Completed,
        ] {
            let db: BookingStatus = status.into();
            assert_eq!(db.to_value(), status.as_str());
            assert_eq!(DomainBookingStatus::from(db), status);
        }
    }

    #[test]
    fn test_role_values_match_claims() {
        assert_eq!(UserRole::from(Role::Admin).to_value(), "admin");
        assert_eq!(Role::from(UserRole::Host), Role::Host);
    }
}
