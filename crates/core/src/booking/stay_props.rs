//! Property-based tests for stay windows.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::booking::stay::{StayWindow, validate_stay};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Strategy for generating valid windows within a two-year horizon.
fn arb_window() -> impl Strategy<Value = StayWindow> {
    (0u64..730, 1u64..60).prop_map(|(offset, nights)| {
        let check_in = base() + Days::new(offset);
        StayWindow::new(check_in, check_in + Days::new(nights)).unwrap()
    })
}

/// Strategy for nightly prices with two decimal places.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Brute force: do the two windows share a night?
fn share_a_night(a: &StayWindow, b: &StayWindow) -> bool {
    a.check_in
        .iter_days()
        .take_while(|d| *d < a.check_out)
        .any(|d| d >= b.check_in && d < b.check_out)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Price is exactly nights × nightly rate.
    #[test]
    fn prop_price_is_nights_times_rate(stay in arb_window(), rate in arb_price()) {
        prop_assert_eq!(stay.price(rate), rate * Decimal::from(stay.nights()));
        prop_assert!(stay.price(rate) >= rate);
    }

    /// Overlap is symmetric.
    #[test]
    fn prop_overlap_symmetric(a in arb_window(), b in arb_window()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    /// Overlap agrees with a night-by-night comparison.
    #[test]
    fn prop_overlap_matches_shared_nights(a in arb_window(), b in arb_window()) {
        prop_assert_eq!(a.overlaps(&b), share_a_night(&a, &b));
    }

    /// A window always overlaps itself.
    #[test]
    fn prop_overlap_reflexive(a in arb_window()) {
        prop_assert!(a.overlaps(&a));
    }

    /// Any check-in before today is rejected.
    #[test]
    fn prop_past_check_in_rejected(days_ago in 1u64..400, nights in 1u64..30) {
        let today = base() + Days::new(400);
        let check_in = today - Days::new(days_ago);
        prop_assert!(validate_stay(check_in, check_in + Days::new(nights), today).is_err());
    }

    /// Check-out on or before check-in is rejected.
    #[test]
    fn prop_inverted_range_rejected(offset in 0u64..365, back in 0u64..30) {
        let check_in = base() + Days::new(offset + 30);
        let check_out = check_in - Days::new(back);
        prop_assert!(validate_stay(check_in, check_out, base()).is_err());
    }
}
