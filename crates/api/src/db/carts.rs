//! Server-backed cart repository.
//!
//! Lines are unique per `(cart_id, product_id)`; adding an existing product
//! merges quantities server-side, so the no-duplicate-line invariant holds
//! for every client.

use sqlx::PgPool;
use uuid::Uuid;

use octocat_supply_core::ProductId;

use super::{RepositoryError, translate_constraint};
use crate::models::{AddCartItem, Cart, CartLine, CartWithItems};

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new empty cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self) -> Result<Cart, RepositoryError> {
        let cart =
            sqlx::query_as::<_, Cart>("INSERT INTO carts DEFAULT VALUES RETURNING *")
                .fetch_one(self.pool)
                .await?;
        Ok(cart)
    }

    /// Get a cart with its lines, ordered by insertion.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(&self, cart_id: Uuid) -> Result<Option<CartWithItems>, RepositoryError> {
        let cart = sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE cart_id = $1")
            .bind(cart_id)
            .fetch_optional(self.pool)
            .await?;

        let Some(cart) = cart else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, CartLine>(
            r"
            SELECT cart_item_id, product_id, quantity, unit_price
            FROM cart_items
            WHERE cart_id = $1
            ORDER BY cart_item_id
            ",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(CartWithItems {
            cart_id: cart.cart_id,
            items,
        }))
    }

    /// Add quantity of a product to a cart, merging into an existing line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart doesn't exist.
    /// Returns `RepositoryError::InvalidReference` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        cart_id: Uuid,
        item: &AddCartItem,
    ) -> Result<CartLine, RepositoryError> {
        if !self.cart_exists(cart_id).await? {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query_as::<_, CartLine>(
            r"
            INSERT INTO cart_items (cart_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            RETURNING cart_item_id, product_id, quantity, unit_price
            ",
        )
        .bind(cart_id)
        .bind(item.product_id.as_i32())
        .bind(item.quantity)
        .bind(item.unit_price)
        .fetch_one(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "cart item"))
    }

    /// Set a line's quantity exactly. A quantity of zero or less removes the
    /// line, matching the reducer's rule that no line is stored at zero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_quantity(
        &self,
        cart_id: Uuid,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        if quantity <= 0 {
            return self.remove_item(cart_id, product_id).await;
        }

        let result = sqlx::query(
            "UPDATE cart_items SET quantity = $3 WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart_id)
        .bind(product_id.as_i32())
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove a product's line from a cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove_item(
        &self,
        cart_id: Uuid,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
                .bind(cart_id)
                .bind(product_id.as_i32())
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove every line from a cart. The cart itself survives.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn clear(&self, cart_id: Uuid) -> Result<(), RepositoryError> {
        if !self.cart_exists(cart_id).await? {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    async fn cart_exists(&self, cart_id: Uuid) -> Result<bool, RepositoryError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM carts WHERE cart_id = $1)")
                .bind(cart_id)
                .fetch_one(self.pool)
                .await?;
        Ok(exists.0)
    }
}
