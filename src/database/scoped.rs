//! Owner-scoped data access.
//!
//! Every task/project read, update, or delete must filter by the owning
//! user's id so a guessed identifier can never reach another user's rows.
//! Rather than repeating the predicate in each handler, this repository
//! carries it: every statement it issues includes `user_id = $owner`.

use sqlx::{postgres::PgRow, FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;

pub struct ScopedRepository<T> {
    table: &'static str,
    entity: &'static str,
    pool: PgPool,
    owner: Uuid,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> ScopedRepository<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table: &'static str, entity: &'static str, pool: PgPool, owner: Uuid) -> Self {
        Self {
            table,
            entity,
            pool,
            owner,
            _phantom: std::marker::PhantomData,
        }
    }

    /// All records owned by the caller, newest first
    pub async fn list(&self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM {} WHERE user_id = $1 ORDER BY created_at DESC",
            self.table
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(self.owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Fetch one record by id within the owner scope
    pub async fn fetch(&self, id: Uuid) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1 AND user_id = $2", self.table);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .bind(self.owner)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch one record or fail with NotFound. Absent and foreign rows are
    /// indistinguishable to the caller.
    pub async fn fetch_or_404(&self, id: Uuid) -> Result<T, DatabaseError> {
        match self.fetch(id).await? {
            Some(row) => Ok(row),
            None => Err(DatabaseError::NotFound(format!("{} not found", self.entity))),
        }
    }

    /// Delete one record by id within the owner scope
    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", self.table);
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(self.owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("{} not found", self.entity)));
        }
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn owner(&self) -> Uuid {
        self.owner
    }
}
