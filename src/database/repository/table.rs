use sqlx::PgConnection;
use uuid::Uuid;

use super::Repository;
use crate::database::manager::DatabaseError;
use crate::database::models::{Table, TableFields};

pub const TABLES: Repository<Table> = Repository::new("tables", "table");

pub async fn insert(conn: &mut PgConnection, fields: &TableFields) -> Result<Table, DatabaseError> {
    let table = sqlx::query_as::<_, Table>(
        "INSERT INTO tables (id, number, capacity, location) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(fields.number)
    .bind(fields.capacity)
    .bind(&fields.location)
    .fetch_one(conn)
    .await?;
    Ok(table)
}

pub async fn update(conn: &mut PgConnection, id: Uuid, fields: &TableFields) -> Result<Table, DatabaseError> {
    sqlx::query_as::<_, Table>(
        "UPDATE tables SET number = $2, capacity = $3, location = $4, updated_at = now() \
         WHERE id = $1 AND NOT deleted RETURNING *",
    )
    .bind(id)
    .bind(fields.number)
    .bind(fields.capacity)
    .bind(&fields.location)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("table {}", id)))
}

/// Lock a live table row for the rest of the transaction.
///
/// Bookings for one table serialize on this lock, so two concurrent requests
/// cannot both pass the conflict check before either inserts.
pub async fn lock(conn: &mut PgConnection, id: Uuid) -> Result<bool, DatabaseError> {
    let row: Option<Uuid> = sqlx::query_scalar("SELECT id FROM tables WHERE id = $1 AND NOT deleted FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}
