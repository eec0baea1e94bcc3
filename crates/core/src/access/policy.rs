//! Stateless authorization predicates.
//!
//! Booking, review and property code asks these questions instead of
//! comparing ids and roles inline, so every component agrees on who may do
//! what.

use roomify_shared::types::UserId;

use crate::access::types::{Principal, Role};
use crate::booking::types::Booking;
use crate::property::types::Property;
use crate::review::types::Review;

/// Stateless authorization policy.
pub struct AccessPolicy;

impl AccessPolicy {
    /// True if the principal is a platform administrator.
    #[must_use]
    pub fn is_admin(principal: &Principal) -> bool {
        principal.role == Role::Admin
    }

    /// True if the principal is the given user.
    #[must_use]
    pub fn is_self(principal: &Principal, user_id: UserId) -> bool {
        principal.id == user_id
    }

    /// True if the principal owns the property.
    ///
    /// Ownership is by id only; the principal's role is not consulted.
    #[must_use]
    pub fn is_owner(principal: &Principal, property: &Property) -> bool {
        principal.id == property.owner_id
    }

    /// Admin, the booking's guest, or the owning host may read a booking.
    #[must_use]
    pub fn can_view_booking(principal: &Principal, booking: &Booking, property: &Property) -> bool {
        Self::is_admin(principal)
            || Self::is_self(principal, booking.guest_id)
            || Self::is_owner(principal, property)
    }

    /// Only the guest or an admin may change booking details.
    #[must_use]
    pub fn can_edit_booking(principal: &Principal, booking: &Booking) -> bool {
        Self::is_self(principal, booking.guest_id) || Self::is_admin(principal)
    }

    /// Only the owning host or an admin may confirm or complete a booking.
    #[must_use]
    pub fn can_manage_booking(principal: &Principal, property: &Property) -> bool {
        Self::is_owner(principal, property) || Self::is_admin(principal)
    }

    /// Any party to the booking may cancel it.
    #[must_use]
    pub fn can_cancel_booking(
        principal: &Principal,
        booking: &Booking,
        property: &Property,
    ) -> bool {
        Self::can_view_booking(principal, booking, property)
    }

    /// Hard deletion is reserved to admins.
    #[must_use]
    pub fn can_remove_booking(principal: &Principal) -> bool {
        Self::is_admin(principal)
    }

    /// Admins may review without having stayed at the property.
    #[must_use]
    pub fn requires_completed_stay(principal: &Principal) -> bool {
        !Self::is_admin(principal)
    }

    /// Only the reviewer or an admin may edit a review.
    #[must_use]
    pub fn can_edit_review(principal: &Principal, review: &Review) -> bool {
        Self::is_self(principal, review.reviewer_id) || Self::is_admin(principal)
    }

    /// The reviewer, the property owner or an admin may delete a review.
    #[must_use]
    pub fn can_remove_review(principal: &Principal, review: &Review, property: &Property) -> bool {
        Self::is_self(principal, review.reviewer_id)
            || Self::is_owner(principal, property)
            || Self::is_admin(principal)
    }
}
