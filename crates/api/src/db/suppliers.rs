//! Supplier repository.

use sqlx::PgPool;

use octocat_supply_core::SupplierId;

use super::{CrudRepository, Entity, RepositoryError, translate_constraint};
use crate::models::{CreateSupplier, Supplier, UpdateSupplier};

impl Entity for Supplier {
    const TABLE: &'static str = "suppliers";
    const ID_COLUMN: &'static str = "supplier_id";
}

/// Repository for supplier database operations.
pub struct SupplierRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SupplierRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    const fn crud(&self) -> CrudRepository<'a, Supplier> {
        CrudRepository::new(self.pool)
    }

    /// List all suppliers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Supplier>, RepositoryError> {
        self.crud().find_all().await
    }

    /// Get a supplier by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: SupplierId) -> Result<Option<Supplier>, RepositoryError> {
        self.crud().find_by_id(id.as_i32()).await
    }

    /// Check whether a supplier exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: SupplierId) -> Result<bool, RepositoryError> {
        self.crud().exists(id.as_i32()).await
    }

    /// Find suppliers whose name contains the given fragment (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_name(&self, fragment: &str) -> Result<Vec<Supplier>, RepositoryError> {
        let rows = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE name ILIKE '%' || $1 || '%' ORDER BY supplier_id",
        )
        .bind(fragment)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a supplier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a unique violation.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &CreateSupplier) -> Result<Supplier, RepositoryError> {
        sqlx::query_as::<_, Supplier>(
            r"
            INSERT INTO suppliers (name, description, contact_person, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.contact_person)
        .bind(&new.email)
        .bind(&new.phone)
        .fetch_one(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "supplier"))
    }

    /// Partially update a supplier; absent fields are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the supplier doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: SupplierId,
        changes: &UpdateSupplier,
    ) -> Result<Supplier, RepositoryError> {
        let row = sqlx::query_as::<_, Supplier>(
            r"
            UPDATE suppliers
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                contact_person = COALESCE($4, contact_person),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone)
            WHERE supplier_id = $1
            RETURNING *
            ",
        )
        .bind(id.as_i32())
        .bind(changes.name.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.contact_person.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.phone.as_deref())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete a supplier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the supplier doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: SupplierId) -> Result<(), RepositoryError> {
        self.crud().delete(id.as_i32()).await
    }
}
