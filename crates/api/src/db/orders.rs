//! Order repository.

use sqlx::PgPool;

use octocat_supply_core::{BranchId, OrderId, OrderStatus};

use super::{CrudRepository, Entity, RepositoryError, translate_constraint};
use crate::models::{CreateOrder, Order, UpdateOrder};

impl Entity for Order {
    const TABLE: &'static str = "orders";
    const ID_COLUMN: &'static str = "order_id";
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    const fn crud(&self) -> CrudRepository<'a, Order> {
        CrudRepository::new(self.pool)
    }

    /// List all orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        self.crud().find_all().await
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        self.crud().find_by_id(id.as_i32()).await
    }

    /// Check whether an order exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: OrderId) -> Result<bool, RepositoryError> {
        self.crud().exists(id.as_i32()).await
    }

    /// List all orders placed by a branch.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_branch(&self, branch_id: BranchId) -> Result<Vec<Order>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE branch_id = $1 ORDER BY order_id")
                .bind(branch_id.as_i32())
                .fetch_all(self.pool)
                .await?;
        Ok(rows)
    }

    /// Create an order. Status defaults to `pending` when omitted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the branch doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &CreateOrder) -> Result<Order, RepositoryError> {
        sqlx::query_as::<_, Order>(
            r"
            INSERT INTO orders (branch_id, order_date, name, description, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(new.branch_id.as_i32())
        .bind(new.order_date)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.status.unwrap_or(OrderStatus::Pending))
        .fetch_one(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "order"))
    }

    /// Partially update an order; absent fields are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::InvalidReference` if a new branch doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: OrderId, changes: &UpdateOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, Order>(
            r"
            UPDATE orders
            SET branch_id = COALESCE($2, branch_id),
                order_date = COALESCE($3, order_date),
                name = COALESCE($4, name),
                description = COALESCE($5, description),
                status = COALESCE($6, status)
            WHERE order_id = $1
            RETURNING *
            ",
        )
        .bind(id.as_i32())
        .bind(changes.branch_id.map(|b| b.as_i32()))
        .bind(changes.order_date)
        .bind(changes.name.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.status)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "order"))?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        self.crud().delete(id.as_i32()).await
    }
}
