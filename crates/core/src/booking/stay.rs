//! Stay windows: date validation, overlap and pricing.
//!
//! A stay is the half-open interval `[check_in, check_out)`: the check-out
//! day is not a night of the stay, so one guest may leave on the same day
//! the next one arrives.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::booking::error::BookingError;

/// The nights a booking occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayWindow {
    /// First night.
    pub check_in: NaiveDate,
    /// Departure day.
    pub check_out: NaiveDate,
}

impl StayWindow {
    /// Creates a window, rejecting empty or inverted ranges.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, BookingError> {
        if check_out <= check_in {
            return Err(BookingError::InvalidDateRange(format!(
                "check-out {check_out} must be after check-in {check_in}"
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Number of nights in the stay.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// True if the two stays share at least one night.
    #[must_use]
    pub fn overlaps(&self, other: &StayWindow) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Total price for the stay at the given nightly rate.
    #[must_use]
    pub fn price(&self, price_per_night: Decimal) -> Decimal {
        price_per_night * Decimal::from(self.nights())
    }
}

/// Validates a requested stay against today's date.
///
/// Check-in today is allowed; check-in yesterday is not.
pub fn validate_stay(
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> Result<StayWindow, BookingError> {
    if check_in < today {
        return Err(BookingError::InvalidDateRange(format!(
            "check-in {check_in} is in the past"
        )));
    }
    StayWindow::new(check_in, check_out)
}
