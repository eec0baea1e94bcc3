//! Booking domain types.
//!
//! This module defines the booking entity, its status, and the typed
//! request structs for each ledger operation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use roomify_shared::types::{BookingId, PropertyId, UserId};

use crate::booking::stay::StayWindow;

/// Booking status in the stay lifecycle.
///
/// The valid transitions are:
/// - Pending → Confirmed (confirm)
/// - Pending → Cancelled (cancel)
/// - Confirmed → Cancelled (cancel)
/// - Confirmed → Completed (complete)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Requested by the guest, not yet guaranteed.
    Pending,
    /// Accepted by the host; holds the dates.
    Confirmed,
    /// Called off by any party (terminal).
    Cancelled,
    /// The stay took place (terminal).
    Completed,
}

impl BookingStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Returns true if guest-facing details may still change.
    ///
    /// Once a host has confirmed, dates and guest count are frozen.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Confirmed | Self::Completed)
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A status-changing action on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    /// Host accepts a pending request.
    Confirm,
    /// Any party calls the stay off.
    Cancel,
    /// Host marks a confirmed stay as done.
    Complete,
}

impl BookingAction {
    /// Returns the status this action moves a booking into.
    #[must_use]
    pub fn target_status(&self) -> BookingStatus {
        match self {
            Self::Confirm => BookingStatus::Confirmed,
            Self::Cancel => BookingStatus::Cancelled,
            Self::Complete => BookingStatus::Completed,
        }
    }

    /// Returns the verb used in logs and messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Complete => "complete",
        }
    }
}

/// A guest's reservation of a property for a stay window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking id.
    pub id: BookingId,
    /// The booked property.
    pub property_id: PropertyId,
    /// The guest who made the booking.
    pub guest_id: UserId,
    /// First night of the stay.
    pub check_in_date: NaiveDate,
    /// Departure day (not a night of the stay).
    pub check_out_date: NaiveDate,
    /// Number of guests.
    pub guest_count: u32,
    /// `nights × price_per_night` at the time the dates were last set.
    pub total_price: Decimal,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Free-text requests for the host.
    pub special_requests: Option<String>,
    /// Payment flag, never changed by the booking engine.
    pub is_paid: bool,
    /// Payment provider reference, never changed by the booking engine.
    pub payment_intent_id: Option<String>,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Returns the half-open interval of nights this booking occupies.
    #[must_use]
    pub fn stay(&self) -> StayWindow {
        StayWindow {
            check_in: self.check_in_date,
            check_out: self.check_out_date,
        }
    }
}

/// Request to create a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookingInput {
    /// Property to book.
    pub property_id: PropertyId,
    /// First night.
    pub check_in_date: NaiveDate,
    /// Departure day.
    pub check_out_date: NaiveDate,
    /// Number of guests.
    pub guest_count: u32,
    /// Optional note for the host.
    pub special_requests: Option<String>,
}

/// Partial update of a booking's guest-facing details.
///
/// Status is deliberately absent: it only moves through
/// confirm/cancel/complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateBookingInput {
    /// New first night.
    pub check_in_date: Option<NaiveDate>,
    /// New departure day.
    pub check_out_date: Option<NaiveDate>,
    /// New guest count.
    pub guest_count: Option<u32>,
    /// New note (`Some(None)` clears it).
    pub special_requests: Option<Option<String>>,
}

impl UpdateBookingInput {
    /// Returns true if either date is being changed.
    #[must_use]
    pub fn changes_dates(&self) -> bool {
        self.check_in_date.is_some() || self.check_out_date.is_some()
    }
}
