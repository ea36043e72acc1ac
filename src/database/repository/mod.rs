// Repository layer: SQL for each resource, run on the caller's connection.
//
// Every function takes `&mut PgConnection` so the same code runs inside a
// `UnitOfWork` transaction or on a plain pooled connection.

pub mod ingredient;
pub mod inventory;
pub mod menu;
pub mod recipe;
pub mod reservation;
pub mod table;
pub mod user;

use sqlx::{postgres::PgRow, FromRow, PgConnection};
use uuid::Uuid;

use crate::database::manager::DatabaseError;

/// Shared reads and soft-delete/restore for tables carrying
/// `deleted` / `deleted_at` columns
pub struct Repository<T> {
    table_name: &'static str,
    label: &'static str,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub const fn new(table_name: &'static str, label: &'static str) -> Self {
        Self {
            table_name,
            label,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn select_all(&self, conn: &mut PgConnection, include_deleted: bool) -> Result<Vec<T>, DatabaseError> {
        let sql = if include_deleted {
            format!("SELECT * FROM {} ORDER BY created_at", self.table_name)
        } else {
            format!("SELECT * FROM {} WHERE NOT deleted ORDER BY created_at", self.table_name)
        };
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(conn).await?;
        Ok(rows)
    }

    pub async fn select_one(&self, conn: &mut PgConnection, id: Uuid) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1 AND NOT deleted", self.table_name);
        let row = sqlx::query_as::<_, T>(&sql).bind(id).fetch_optional(conn).await?;
        Ok(row)
    }

    pub async fn select_404(&self, conn: &mut PgConnection, id: Uuid) -> Result<T, DatabaseError> {
        self.select_one(conn, id)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    pub async fn exists(&self, conn: &mut PgConnection, id: Uuid) -> Result<bool, DatabaseError> {
        let sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1 AND NOT deleted)", self.table_name);
        let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(conn).await?;
        Ok(exists)
    }

    pub async fn soft_delete(&self, conn: &mut PgConnection, id: Uuid) -> Result<T, DatabaseError> {
        let sql = format!(
            "UPDATE {} SET deleted = true, deleted_at = now(), updated_at = now() \
             WHERE id = $1 AND NOT deleted RETURNING *",
            self.table_name
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    pub async fn restore(&self, conn: &mut PgConnection, id: Uuid) -> Result<T, DatabaseError> {
        let sql = format!(
            "UPDATE {} SET deleted = false, deleted_at = NULL, updated_at = now() \
             WHERE id = $1 AND deleted RETURNING *",
            self.table_name
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("deleted {} {}", self.label, id)))
    }

    fn not_found(&self, id: Uuid) -> DatabaseError {
        DatabaseError::NotFound(format!("{} {}", self.label, id))
    }
}
