//! Property repository for database operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use roomify_core::persistence::PersistenceError;
use roomify_core::property::{Property, PropertyCatalog, PropertyStatus};
use roomify_shared::types::{PropertyId, UserId};

use super::error::{classify, corrupt};
use crate::entities::properties;

/// Input for listing a new property.
#[derive(Debug, Clone)]
pub struct CreatePropertyInput {
    /// Host who owns the listing.
    pub owner_id: UserId,
    /// Listing title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Nightly rate.
    pub price_per_night: Decimal,
    /// Capacity.
    pub max_guests: u32,
    /// Initial status.
    pub status: PropertyStatus,
}

/// Property repository.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    db: DatabaseConnection,
}

impl PropertyRepository {
    /// Creates a new property repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a new property.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreatePropertyInput) -> Result<Property, PersistenceError> {
        let max_guests =
            i32::try_from(input.max_guests).map_err(|e| corrupt("max_guests", e))?;
        let now = Utc::now().into();
        let model = properties::ActiveModel {
            id: Set(PropertyId::new().into_inner()),
            owner_id: Set(input.owner_id.into_inner()),
            title: Set(input.title),
            description: Set(input.description),
            price_per_night: Set(input.price_per_night),
            max_guests: Set(max_guests),
            status: Set(input.status.into()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(classify)?;

        to_domain(model)
    }
}

impl PropertyCatalog for PropertyRepository {
    async fn find_one(&self, id: PropertyId) -> Result<Option<Property>, PersistenceError> {
        let model = properties::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(classify)?;

        model.map(to_domain).transpose()
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Property>, PersistenceError> {
        let models = properties::Entity::find()
            .filter(properties::Column::OwnerId.eq(Uuid::from(owner_id)))
            .order_by_asc(properties::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(classify)?;

        models.into_iter().map(to_domain).collect()
    }
}

fn to_domain(model: properties::Model) -> Result<Property, PersistenceError> {
    Ok(Property {
        id: PropertyId::from(model.id),
        owner_id: UserId::from(model.owner_id),
        title: model.title,
        price_per_night: model.price_per_night,
        max_guests: u32::try_from(model.max_guests).map_err(|e| corrupt("max_guests", e))?,
        status: model.status.into(),
    })
}
