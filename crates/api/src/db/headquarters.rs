//! Headquarters repository.

use sqlx::PgPool;

use octocat_supply_core::HeadquartersId;

use super::{CrudRepository, Entity, RepositoryError, translate_constraint};
use crate::models::{CreateHeadquarters, Headquarters, UpdateHeadquarters};

impl Entity for Headquarters {
    const TABLE: &'static str = "headquarters";
    const ID_COLUMN: &'static str = "headquarters_id";
}

/// Repository for headquarters database operations.
pub struct HeadquartersRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HeadquartersRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    const fn crud(&self) -> CrudRepository<'a, Headquarters> {
        CrudRepository::new(self.pool)
    }

    /// List all headquarters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Headquarters>, RepositoryError> {
        self.crud().find_all().await
    }

    /// Get a headquarters by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(
        &self,
        id: HeadquartersId,
    ) -> Result<Option<Headquarters>, RepositoryError> {
        self.crud().find_by_id(id.as_i32()).await
    }

    /// Check whether a headquarters exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: HeadquartersId) -> Result<bool, RepositoryError> {
        self.crud().exists(id.as_i32()).await
    }

    /// Create a headquarters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &CreateHeadquarters) -> Result<Headquarters, RepositoryError> {
        sqlx::query_as::<_, Headquarters>(
            r"
            INSERT INTO headquarters (name, description, address, contact_person, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.address)
        .bind(&new.contact_person)
        .bind(&new.email)
        .bind(&new.phone)
        .fetch_one(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "headquarters"))
    }

    /// Partially update a headquarters; absent fields are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the headquarters doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: HeadquartersId,
        changes: &UpdateHeadquarters,
    ) -> Result<Headquarters, RepositoryError> {
        let row = sqlx::query_as::<_, Headquarters>(
            r"
            UPDATE headquarters
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                address = COALESCE($4, address),
                contact_person = COALESCE($5, contact_person),
                email = COALESCE($6, email),
                phone = COALESCE($7, phone)
            WHERE headquarters_id = $1
            RETURNING *
            ",
        )
        .bind(id.as_i32())
        .bind(changes.name.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.address.as_deref())
        .bind(changes.contact_person.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.phone.as_deref())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete a headquarters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the headquarters doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: HeadquartersId) -> Result<(), RepositoryError> {
        self.crud().delete(id.as_i32()).await
    }
}
