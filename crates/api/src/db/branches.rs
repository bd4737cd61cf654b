//! Branch repository.

use sqlx::PgPool;

use octocat_supply_core::{BranchId, HeadquartersId};

use super::{CrudRepository, Entity, RepositoryError, translate_constraint};
use crate::models::{Branch, CreateBranch, UpdateBranch};

impl Entity for Branch {
    const TABLE: &'static str = "branches";
    const ID_COLUMN: &'static str = "branch_id";
}

/// Repository for branch database operations.
pub struct BranchRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BranchRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    const fn crud(&self) -> CrudRepository<'a, Branch> {
        CrudRepository::new(self.pool)
    }

    /// List all branches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Branch>, RepositoryError> {
        self.crud().find_all().await
    }

    /// Get a branch by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: BranchId) -> Result<Option<Branch>, RepositoryError> {
        self.crud().find_by_id(id.as_i32()).await
    }

    /// Check whether a branch exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: BranchId) -> Result<bool, RepositoryError> {
        self.crud().exists(id.as_i32()).await
    }

    /// List all branches of a headquarters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_headquarters(
        &self,
        headquarters_id: HeadquartersId,
    ) -> Result<Vec<Branch>, RepositoryError> {
        let rows = sqlx::query_as::<_, Branch>(
            "SELECT * FROM branches WHERE headquarters_id = $1 ORDER BY branch_id",
        )
        .bind(headquarters_id.as_i32())
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a branch.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the headquarters doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &CreateBranch) -> Result<Branch, RepositoryError> {
        sqlx::query_as::<_, Branch>(
            r"
            INSERT INTO branches (headquarters_id, name, description, address, contact_person, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            ",
        )
        .bind(new.headquarters_id.as_i32())
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.address)
        .bind(&new.contact_person)
        .bind(&new.email)
        .bind(&new.phone)
        .fetch_one(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "branch"))
    }

    /// Partially update a branch; absent fields are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the branch doesn't exist.
    /// Returns `RepositoryError::InvalidReference` if a new headquarters doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: BranchId,
        changes: &UpdateBranch,
    ) -> Result<Branch, RepositoryError> {
        let row = sqlx::query_as::<_, Branch>(
            r"
            UPDATE branches
            SET headquarters_id = COALESCE($2, headquarters_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                address = COALESCE($5, address),
                contact_person = COALESCE($6, contact_person),
                email = COALESCE($7, email),
                phone = COALESCE($8, phone)
            WHERE branch_id = $1
            RETURNING *
            ",
        )
        .bind(id.as_i32())
        .bind(changes.headquarters_id.map(|h| h.as_i32()))
        .bind(changes.name.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.address.as_deref())
        .bind(changes.contact_person.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.phone.as_deref())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| translate_constraint(e, "branch"))?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete a branch.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the branch doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: BranchId) -> Result<(), RepositoryError> {
        self.crud().delete(id.as_i32()).await
    }
}
