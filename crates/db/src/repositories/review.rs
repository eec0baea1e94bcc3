//! Review repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, Set, Statement,
};
use uuid::Uuid;

use roomify_core::persistence::PersistenceError;
use roomify_core::review::{RatingTotals, Review, ReviewStore};
use roomify_shared::types::{PropertyId, ReviewId, UserId};

use super::error::{classify, corrupt};
use crate::entities::reviews;

/// Review repository implementation.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    db: DatabaseConnection,
}

impl ReviewRepository {
    /// Creates a new review repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list(
        &self,
        query: sea_orm::Select<reviews::Entity>,
    ) -> Result<Vec<Review>, PersistenceError> {
        let models = query
            .order_by_desc(reviews::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(classify)?;

        models.into_iter().map(to_domain).collect()
    }
}

#[derive(Debug, FromQueryResult)]
struct TotalsRow {
    review_count: i64,
    rating_sum: i64,
}

impl ReviewStore for ReviewRepository {
    async fn insert(&self, review: Review) -> Result<Review, PersistenceError> {
        let model = reviews::ActiveModel {
            id: Set(review.id.into_inner()),
            property_id: Set(review.property_id.into_inner()),
            reviewer_id: Set(review.reviewer_id.into_inner()),
            rating: Set(i16::from(review.rating)),
            comment: Set(review.comment),
            created_at: Set(review.created_at.into()),
            updated_at: Set(review.updated_at.into()),
        }
        .insert(&self.db)
        .await
        .map_err(classify)?;

        to_domain(model)
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, PersistenceError> {
        let model = reviews::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(classify)?;

        model.map(to_domain).transpose()
    }

    async fn find_by_reviewer_and_property(
        &self,
        reviewer_id: UserId,
        property_id: PropertyId,
    ) -> Result<Option<Review>, PersistenceError> {
        let model = reviews::Entity::find()
            .filter(reviews::Column::ReviewerId.eq(Uuid::from(reviewer_id)))
            .filter(reviews::Column::PropertyId.eq(Uuid::from(property_id)))
            .one(&self.db)
            .await
            .map_err(classify)?;

        model.map(to_domain).transpose()
    }

    async fn list_by_property(&self, property_id: PropertyId) -> Result<Vec<Review>, PersistenceError> {
        self.list(
            reviews::Entity::find()
                .filter(reviews::Column::PropertyId.eq(Uuid::from(property_id))),
        )
        .await
    }

    async fn list_by_reviewer(&self, reviewer_id: UserId) -> Result<Vec<Review>, PersistenceError> {
        self.list(
            reviews::Entity::find()
                .filter(reviews::Column::ReviewerId.eq(Uuid::from(reviewer_id))),
        )
        .await
    }

    async fn update(&self, review: Review) -> Result<Option<Review>, PersistenceError> {
        let changes = reviews::ActiveModel {
            rating: Set(i16::from(review.rating)),
            comment: Set(review.comment),
            updated_at: Set(review.updated_at.into()),
            ..Default::default()
        };

        let rows = reviews::Entity::update_many()
            .set(changes)
            .filter(reviews::Column::Id.eq(review.id.into_inner()))
            .exec_with_returning(&self.db)
            .await
            .map_err(classify)?;

        rows.into_iter().next().map(to_domain).transpose()
    }

    async fn delete(&self, id: ReviewId) -> Result<bool, PersistenceError> {
        let result = reviews::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(classify)?;

        Ok(result.rows_affected > 0)
    }

    async fn rating_totals(&self, property_id: PropertyId) -> Result<RatingTotals, PersistenceError> {
        let row = TotalsRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r"SELECT COUNT(*)::BIGINT AS review_count,
                     COALESCE(SUM(rating), 0)::BIGINT AS rating_sum
              FROM reviews
              WHERE property_id = $1",
            [Uuid::from(property_id).into()],
        ))
        .one(&self.db)
        .await
        .map_err(classify)?;

        let Some(row) = row else {
            return Ok(RatingTotals::default());
        };
        Ok(RatingTotals {
            review_count: u64::try_from(row.review_count).map_err(|e| corrupt("review_count", e))?,
            rating_sum: u64::try_from(row.rating_sum).map_err(|e| corrupt("rating_sum", e))?,
        })
    }
}

fn to_domain(model: reviews::Model) -> Result<Review, PersistenceError> {
    Ok(Review {
        id: ReviewId::from(model.id),
        property_id: PropertyId::from(model.property_id),
        reviewer_id: UserId::from(model.reviewer_id),
        rating: u8::try_from(model.rating).map_err(|e| corrupt("rating", e))?,
        comment: model.comment,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    })
}
