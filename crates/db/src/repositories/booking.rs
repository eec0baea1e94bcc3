//! Booking repository for database operations.
//!
//! Status-sensitive writes are single `UPDATE … WHERE id = $1 AND status = $2
//! RETURNING *` statements, so a concurrent writer in another process can
//! never be overwritten: it either already moved the row (zero rows, `None`)
//! or it is serialized behind us by PostgreSQL's row lock.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use roomify_core::booking::{Booking, BookingStatus, BookingStore, StayWindow};
use roomify_core::persistence::PersistenceError;
use roomify_shared::types::{BookingId, PropertyId, UserId};

use super::error::{classify, corrupt};
use crate::entities::{bookings, sea_orm_active_enums::BookingStatus as DbBookingStatus};

/// Booking repository implementation.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    db: DatabaseConnection,
}

impl BookingRepository {
    /// Creates a new booking repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list(
        &self,
        query: sea_orm::Select<bookings::Entity>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        let models = query
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(classify)?;

        models.into_iter().map(to_domain).collect()
    }
}

impl BookingStore for BookingRepository {
    async fn insert(&self, booking: Booking) -> Result<Booking, PersistenceError> {
        let guest_count =
            i32::try_from(booking.guest_count).map_err(|e| corrupt("guest_count", e))?;
        let model = bookings::ActiveModel {
            id: Set(booking.id.into_inner()),
            property_id: Set(booking.property_id.into_inner()),
            guest_id: Set(booking.guest_id.into_inner()),
            check_in_date: Set(booking.check_in_date),
            check_out_date: Set(booking.check_out_date),
            guest_count: Set(guest_count),
            total_price: Set(booking.total_price),
            status: Set(booking.status.into()),
            special_requests: Set(booking.special_requests),
            is_paid: Set(booking.is_paid),
            payment_intent_id: Set(booking.payment_intent_id),
            created_at: Set(booking.created_at.into()),
            updated_at: Set(booking.updated_at.into()),
        }
        .insert(&self.db)
        .await
        .map_err(classify)?;

        to_domain(model)
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, PersistenceError> {
        let model = bookings::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(classify)?;

        model.map(to_domain).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, PersistenceError> {
        self.list(bookings::Entity::find()).await
    }

    async fn list_by_guest(&self, guest_id: UserId) -> Result<Vec<Booking>, PersistenceError> {
        self.list(
            bookings::Entity::find().filter(bookings::Column::GuestId.eq(Uuid::from(guest_id))),
        )
        .await
    }

    async fn list_by_properties(
        &self,
        property_ids: Vec<PropertyId>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        let ids: Vec<Uuid> = property_ids.into_iter().map(Uuid::from).collect();
        self.list(bookings::Entity::find().filter(bookings::Column::PropertyId.is_in(ids)))
            .await
    }

    async fn list_by_guest_and_property(
        &self,
        guest_id: UserId,
        property_id: PropertyId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        let mut query = bookings::Entity::find()
            .filter(bookings::Column::GuestId.eq(Uuid::from(guest_id)))
            .filter(bookings::Column::PropertyId.eq(Uuid::from(property_id)));
        if let Some(status) = status {
            query = query.filter(bookings::Column::Status.eq(DbBookingStatus::from(status)));
        }
        self.list(query).await
    }

    async fn find_confirmed_overlapping(
        &self,
        property_id: PropertyId,
        stay: StayWindow,
        exclude: Option<BookingId>,
    ) -> Result<Vec<Booking>, PersistenceError> {
        let mut query = bookings::Entity::find()
            .filter(bookings::Column::PropertyId.eq(Uuid::from(property_id)))
            .filter(bookings::Column::Status.eq(DbBookingStatus::Confirmed))
            .filter(bookings::Column::CheckInDate.lt(stay.check_out))
            .filter(bookings::Column::CheckOutDate.gt(stay.check_in));
        if let Some(excluded) = exclude {
            query = query.filter(bookings::Column::Id.ne(Uuid::from(excluded)));
        }
        self.list(query).await
    }

    async fn update_details(
        &self,
        booking: Booking,
        expected_status: BookingStatus,
    ) -> Result<Option<Booking>, PersistenceError> {
        let guest_count =
            i32::try_from(booking.guest_count).map_err(|e| corrupt("guest_count", e))?;
        let changes = bookings::ActiveModel {
            check_in_date: Set(booking.check_in_date),
            check_out_date: Set(booking.check_out_date),
            guest_count: Set(guest_count),
            total_price: Set(booking.total_price),
            special_requests: Set(booking.special_requests),
            updated_at: Set(booking.updated_at.into()),
            ..Default::default()
        };

        let rows = bookings::Entity::update_many()
            .set(changes)
            .filter(bookings::Column::Id.eq(booking.id.into_inner()))
            .filter(bookings::Column::Status.eq(DbBookingStatus::from(expected_status)))
            .exec_with_returning(&self.db)
            .await
            .map_err(classify)?;

        rows.into_iter().next().map(to_domain).transpose()
    }

    async fn transition_status(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<Booking>, PersistenceError> {
        let changes = bookings::ActiveModel {
            status: Set(to.into()),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let rows = bookings::Entity::update_many()
            .set(changes)
            .filter(bookings::Column::Id.eq(id.into_inner()))
            .filter(bookings::Column::Status.eq(DbBookingStatus::from(from)))
            .exec_with_returning(&self.db)
            .await
            .map_err(classify)?;

        rows.into_iter().next().map(to_domain).transpose()
    }

    async fn delete(&self, id: BookingId) -> Result<bool, PersistenceError> {
        let result = bookings::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(classify)?;

        Ok(result.rows_affected > 0)
    }
}

fn to_domain(model: bookings::Model) -> Result<Booking, PersistenceError> {
    Ok(Booking {
        id: BookingId::from(model.id),
        property_id: PropertyId::from(model.property_id),
        guest_id: UserId::from(model.guest_id),
        check_in_date: model.check_in_date,
        check_out_date: model.check_out_date,
        guest_count: u32::try_from(model.guest_count).map_err(|e| corrupt("guest_count", e))?,
        total_price: model.total_price,
        status: model.status.into(),
        special_requests: model.special_requests,
        is_paid: model.is_paid,
        payment_intent_id: model.payment_intent_id,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    })
}
