//! Property attributes consumed by the booking engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use roomify_shared::types::{PropertyId, UserId};

/// Listing status of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    /// Listed and bookable.
    Active,
    /// Delisted by the owner.
    Inactive,
    /// Awaiting review before listing.
    Pending,
}

impl PropertyStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A listed property, as seen by bookings and reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property id.
    pub id: PropertyId,
    /// The host who listed it.
    pub owner_id: UserId,
    /// Listing title.
    pub title: String,
    /// Nightly rate.
    pub price_per_night: Decimal,
    /// Maximum number of guests per booking.
    pub max_guests: u32,
    /// Listing status.
    pub status: PropertyStatus,
}

impl Property {
    /// Only active properties accept new bookings.
    #[must_use]
    pub fn is_bookable(&self) -> bool {
        self.status == PropertyStatus::Active
    }
}
