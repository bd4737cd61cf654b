//! Delivery repository.

use sqlx::PgPool;

use octocat_supply_core::{DeliveryId, DeliveryStatus, SupplierId};

use super::{CrudRepository, Entity, RepositoryError, translate_constraint};
use crate::models::{CreateDelivery, Delivery, UpdateDelivery};

impl Entity for Delivery {
    const TABLE: &'static str = "deliveries";
    const ID_COLUMN: &'static str = "delivery_id";
}

/// Repository for delivery database operations.
pub struct DeliveryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DeliveryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    const fn crud(&self) -> CrudRepository<'a, Delivery> {
        CrudRepository::new(self.pool)
    }

    /// List all deliveries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Delivery>, RepositoryError> {
        self.crud().find_all().await
    }

    /// Get a delivery by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: DeliveryId) -> Result<Option<Delivery>, RepositoryError> {
        self.crud().find_by_id(id.as_i32()).await
    }

    /// Check whether a delivery exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: DeliveryId) -> Result<bool, RepositoryError> {
        self.crud().exists(id.as_i32()).await
    }

    /// List all deliveries from a supplier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_supplier(
        &self,
        supplier_id: SupplierId,
    ) -> Result<Vec<Delivery>, RepositoryError> {
        let rows = sqlx::query_as::<_, Delivery>(
            "SELECT * FROM deliveries WHERE supplier_id = $1 ORDER BY delivery_id",
        )
        .bind(supplier_id.as_i32())
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a delivery. Status defaults to `pending` when omitted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the supplier doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &CreateDelivery) -> Result<Delivery, RepositoryError> {
        sqlx::query_as::<_, Delivery>(
            r"
            INSERT INTO deliveries (supplier_id, delivery_date, name, description, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(new.supplier_id.as_i32())
        .bind(new.delivery_date)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.status.unwrap_or(DeliveryStatus::Pending))
        .fetch_one(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "delivery"))
    }

    /// Partially update a delivery; absent fields are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the delivery doesn't exist.
    /// Returns `RepositoryError::InvalidReference` if a new supplier doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: DeliveryId,
        changes: &UpdateDelivery,
    ) -> Result<Delivery, RepositoryError> {
        let row = sqlx::query_as::<_, Delivery>(
            r"
            UPDATE deliveries
            SET supplier_id = COALESCE($2, supplier_id),
                delivery_date = COALESCE($3, delivery_date),
                name = COALESCE($4, name),
                description = COALESCE($5, description),
                status = COALESCE($6, status)
            WHERE delivery_id = $1
            RETURNING *
            ",
        )
        .bind(id.as_i32())
        .bind(changes.supplier_id.map(|s| s.as_i32()))
        .bind(changes.delivery_date)
        .bind(changes.name.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.status)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "delivery"))?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete a delivery.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the delivery doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: DeliveryId) -> Result<(), RepositoryError> {
        self.crud().delete(id.as_i32()).await
    }
}
