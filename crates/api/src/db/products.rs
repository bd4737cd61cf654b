//! Product repository.

use sqlx::PgPool;

use octocat_supply_core::{ProductId, SupplierId};

use super::{CrudRepository, Entity, RepositoryError, translate_constraint};
use crate::models::{CreateProduct, Product, UpdateProduct};

impl Entity for Product {
    const TABLE: &'static str = "products";
    const ID_COLUMN: &'static str = "product_id";
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    const fn crud(&self) -> CrudRepository<'a, Product> {
        CrudRepository::new(self.pool)
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        self.crud().find_all().await
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        self.crud().find_by_id(id.as_i32()).await
    }

    /// Check whether a product exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: ProductId) -> Result<bool, RepositoryError> {
        self.crud().exists(id.as_i32()).await
    }

    /// List all products offered by a supplier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_supplier(
        &self,
        supplier_id: SupplierId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE supplier_id = $1 ORDER BY product_id",
        )
        .bind(supplier_id.as_i32())
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Find products whose name contains the given fragment (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, fragment: &str) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE name ILIKE '%' || $1 || '%' ORDER BY product_id",
        )
        .bind(fragment)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a duplicate SKU.
    /// Returns `RepositoryError::InvalidReference` if the supplier doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &CreateProduct) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (supplier_id, name, description, price, sku, unit, img_name, discount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            ",
        )
        .bind(new.supplier_id.as_i32())
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(&new.sku)
        .bind(&new.unit)
        .bind(&new.img_name)
        .bind(new.discount)
        .fetch_one(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "product"))
    }

    /// Partially update a product; absent fields are kept. `discount` cannot
    /// be cleared through this path, only changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::InvalidReference` if a new supplier doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        changes: &UpdateProduct,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, Product>(
            r"
            UPDATE products
            SET supplier_id = COALESCE($2, supplier_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                sku = COALESCE($6, sku),
                unit = COALESCE($7, unit),
                img_name = COALESCE($8, img_name),
                discount = COALESCE($9, discount)
            WHERE product_id = $1
            RETURNING *
            ",
        )
        .bind(id.as_i32())
        .bind(changes.supplier_id.map(|s| s.as_i32()))
        .bind(changes.name.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.price)
        .bind(changes.sku.as_deref())
        .bind(changes.unit.as_deref())
        .bind(changes.img_name.as_deref())
        .bind(changes.discount)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "product"))?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        self.crud().delete(id.as_i32()).await
    }
}
