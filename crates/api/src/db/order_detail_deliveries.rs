//! Order detail delivery (fulfilment allocation) repository.

use sqlx::PgPool;

use octocat_supply_core::{DeliveryId, OrderDetailDeliveryId};

use super::{CrudRepository, Entity, RepositoryError, translate_constraint};
use crate::models::{CreateOrderDetailDelivery, OrderDetailDelivery, UpdateOrderDetailDelivery};

impl Entity for OrderDetailDelivery {
    const TABLE: &'static str = "order_detail_deliveries";
    const ID_COLUMN: &'static str = "order_detail_delivery_id";
}

/// Repository for order detail delivery database operations.
pub struct OrderDetailDeliveryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderDetailDeliveryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    const fn crud(&self) -> CrudRepository<'a, OrderDetailDelivery> {
        CrudRepository::new(self.pool)
    }

    /// List all allocations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<OrderDetailDelivery>, RepositoryError> {
        self.crud().find_all().await
    }

    /// Get an allocation by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(
        &self,
        id: OrderDetailDeliveryId,
    ) -> Result<Option<OrderDetailDelivery>, RepositoryError> {
        self.crud().find_by_id(id.as_i32()).await
    }

    /// Check whether an allocation exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: OrderDetailDeliveryId) -> Result<bool, RepositoryError> {
        self.crud().exists(id.as_i32()).await
    }

    /// List all allocations fulfilled by a delivery.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_delivery(
        &self,
        delivery_id: DeliveryId,
    ) -> Result<Vec<OrderDetailDelivery>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderDetailDelivery>(
            "SELECT * FROM order_detail_deliveries WHERE delivery_id = $1 ORDER BY order_detail_delivery_id",
        )
        .bind(delivery_id.as_i32())
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Create an allocation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the order detail or delivery doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        new: &CreateOrderDetailDelivery,
    ) -> Result<OrderDetailDelivery, RepositoryError> {
        sqlx::query_as::<_, OrderDetailDelivery>(
            r"
            INSERT INTO order_detail_deliveries (order_detail_id, delivery_id, quantity, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(new.order_detail_id.as_i32())
        .bind(new.delivery_id.as_i32())
        .bind(new.quantity)
        .bind(&new.notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "order detail delivery"))
    }

    /// Partially update an allocation; absent fields are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the allocation doesn't exist.
    /// Returns `RepositoryError::InvalidReference` if a new reference doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: OrderDetailDeliveryId,
        changes: &UpdateOrderDetailDelivery,
    ) -> Result<OrderDetailDelivery, RepositoryError> {
        let row = sqlx::query_as::<_, OrderDetailDelivery>(
            r"
            UPDATE order_detail_deliveries
            SET order_detail_id = COALESCE($2, order_detail_id),
                delivery_id = COALESCE($3, delivery_id),
                quantity = COALESCE($4, quantity),
                notes = COALESCE($5, notes)
            WHERE order_detail_delivery_id = $1
            RETURNING *
            ",
        )
        .bind(id.as_i32())
        .bind(changes.order_detail_id.map(|o| o.as_i32()))
        .bind(changes.delivery_id.map(|d| d.as_i32()))
        .bind(changes.quantity)
        .bind(changes.notes.as_deref())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "order detail delivery"))?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete an allocation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the allocation doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OrderDetailDeliveryId) -> Result<(), RepositoryError> {
        self.crud().delete(id.as_i32()).await
    }
}
