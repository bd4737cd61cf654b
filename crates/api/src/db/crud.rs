//! Generic CRUD plumbing shared by every resource repository.
//!
//! The per-resource repositories all need the same four queries, differing
//! only in table metadata. [`Entity`] carries that metadata and
//! [`CrudRepository`] derives the SQL from it; per-resource repositories
//! delegate here and hand-write only `create`, `update`, and their bespoke
//! finders.

use std::marker::PhantomData;

use sqlx::PgPool;
use sqlx::postgres::PgRow;

use super::RepositoryError;

/// A database-backed resource with an integer primary key.
///
/// `TABLE` and `ID_COLUMN` are trusted compile-time constants; they are
/// interpolated into SQL, so they must never come from user input.
pub trait Entity: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin {
    /// Table name.
    const TABLE: &'static str;
    /// Primary key column name.
    const ID_COLUMN: &'static str;
}

/// Metadata-driven queries for an [`Entity`].
pub struct CrudRepository<'a, E: Entity> {
    pool: &'a PgPool,
    _entity: PhantomData<E>,
}

impl<'a, E: Entity> CrudRepository<'a, E> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// Fetch every row, ordered by primary key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        let sql = format!("SELECT * FROM {} ORDER BY {}", E::TABLE, E::ID_COLUMN);
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(self.pool).await?;
        Ok(rows)
    }

    /// Fetch one row by primary key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<E>, RepositoryError> {
        let sql = format!("SELECT * FROM {} WHERE {} = $1", E::TABLE, E::ID_COLUMN);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Check whether a row with the given primary key exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: i32) -> Result<bool, RepositoryError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1)",
            E::TABLE,
            E::ID_COLUMN
        );
        let exists: (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(self.pool).await?;
        Ok(exists.0)
    }

    /// Delete one row by primary key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let sql = format!("DELETE FROM {} WHERE {} = $1", E::TABLE, E::ID_COLUMN);
        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
