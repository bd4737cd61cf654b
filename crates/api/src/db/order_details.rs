//! Order detail (line item) repository.

use sqlx::PgPool;

use octocat_supply_core::{OrderDetailId, OrderId};

use super::{CrudRepository, Entity, RepositoryError, translate_constraint};
use crate::models::{CreateOrderDetail, OrderDetail, UpdateOrderDetail};

impl Entity for OrderDetail {
    const TABLE: &'static str = "order_details";
    const ID_COLUMN: &'static str = "order_detail_id";
}

/// Repository for order detail database operations.
pub struct OrderDetailRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderDetailRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    const fn crud(&self) -> CrudRepository<'a, OrderDetail> {
        CrudRepository::new(self.pool)
    }

    /// List all order details.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<OrderDetail>, RepositoryError> {
        self.crud().find_all().await
    }

    /// Get an order detail by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(
        &self,
        id: OrderDetailId,
    ) -> Result<Option<OrderDetail>, RepositoryError> {
        self.crud().find_by_id(id.as_i32()).await
    }

    /// Check whether an order detail exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: OrderDetailId) -> Result<bool, RepositoryError> {
        self.crud().exists(id.as_i32()).await
    }

    /// List all line items of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_order(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderDetail>(
            "SELECT * FROM order_details WHERE order_id = $1 ORDER BY order_detail_id",
        )
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Create an order detail.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the order or product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &CreateOrderDetail) -> Result<OrderDetail, RepositoryError> {
        sqlx::query_as::<_, OrderDetail>(
            r"
            INSERT INTO order_details (order_id, product_id, quantity, unit_price, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(new.order_id.as_i32())
        .bind(new.product_id.as_i32())
        .bind(new.quantity)
        .bind(new.unit_price)
        .bind(&new.notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "order detail"))
    }

    /// Partially update an order detail; absent fields are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order detail doesn't exist.
    /// Returns `RepositoryError::InvalidReference` if a new order or product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: OrderDetailId,
        changes: &UpdateOrderDetail,
    ) -> Result<OrderDetail, RepositoryError> {
        let row = sqlx::query_as::<_, OrderDetail>(
            r"
            UPDATE order_details
            SET order_id = COALESCE($2, order_id),
                product_id = COALESCE($3, product_id),
                quantity = COALESCE($4, quantity),
                unit_price = COALESCE($5, unit_price),
                notes = COALESCE($6, notes)
            WHERE order_detail_id = $1
            RETURNING *
            ",
        )
        .bind(id.as_i32())
        .bind(changes.order_id.map(|o| o.as_i32()))
        .bind(changes.product_id.map(|p| p.as_i32()))
        .bind(changes.quantity)
        .bind(changes.unit_price)
        .bind(changes.notes.as_deref())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "order detail"))?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete an order detail.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order detail doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OrderDetailId) -> Result<(), RepositoryError> {
        self.crud().delete(id.as_i32()).await
    }
}
