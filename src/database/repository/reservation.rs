use chrono::NaiveDate;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use uuid::Uuid;

use super::Repository;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewReservation, Reservation, ReservationChanges, ReservationFilter, ReservationStatus};

pub const RESERVATIONS: Repository<Reservation> = Repository::new("reservations", "reservation");

pub async fn insert(conn: &mut PgConnection, user_id: Uuid, input: &NewReservation) -> Result<Reservation, DatabaseError> {
    let reservation = sqlx::query_as::<_, Reservation>(
        "INSERT INTO reservations (id, table_id, user_id, reservation_date, reservation_time, guest_count, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(input.table_id)
    .bind(user_id)
    .bind(input.date)
    .bind(input.time)
    .bind(input.guest_count)
    .bind(ReservationStatus::Pending)
    .fetch_one(conn)
    .await?;
    Ok(reservation)
}

/// Every live confirmed reservation on a table for one calendar date
pub async fn confirmed_for_table_on(
    conn: &mut PgConnection,
    table_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<Reservation>, DatabaseError> {
    let rows = sqlx::query_as::<_, Reservation>(
        "SELECT * FROM reservations \
         WHERE table_id = $1 AND reservation_date = $2 AND status = 'confirmed' AND NOT deleted \
         ORDER BY reservation_time",
    )
    .bind(table_id)
    .bind(date)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn list(conn: &mut PgConnection, filter: &ReservationFilter) -> Result<Vec<Reservation>, DatabaseError> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM reservations WHERE true");
    if !filter.include_deleted {
        query.push(" AND NOT deleted");
    }
    if let Some(table_id) = filter.table_id {
        query.push(" AND table_id = ").push_bind(table_id);
    }
    if let Some(date) = filter.date {
        query.push(" AND reservation_date = ").push_bind(date);
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status);
    }
    if let Some(user_id) = filter.user_id {
        query.push(" AND user_id = ").push_bind(user_id);
    }
    query.push(" ORDER BY reservation_date, reservation_time");

    let rows = query.build_query_as::<Reservation>().fetch_all(conn).await?;
    Ok(rows)
}

/// Apply the present fields of `changes`; absent ones keep their value
pub async fn update(conn: &mut PgConnection, id: Uuid, changes: &ReservationChanges) -> Result<Reservation, DatabaseError> {
    sqlx::query_as::<_, Reservation>(
        "UPDATE reservations SET \
         reservation_date = COALESCE($2, reservation_date), \
         reservation_time = COALESCE($3, reservation_time), \
         guest_count = COALESCE($4, guest_count), \
         updated_at = now() \
         WHERE id = $1 AND NOT deleted RETURNING *",
    )
    .bind(id)
    .bind(changes.date)
    .bind(changes.time)
    .bind(changes.guest_count)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("reservation {}", id)))
}

pub async fn set_status(conn: &mut PgConnection, id: Uuid, status: ReservationStatus) -> Result<Reservation, DatabaseError> {
    sqlx::query_as::<_, Reservation>(
        "UPDATE reservations SET status = $2, updated_at = now() WHERE id = $1 AND NOT deleted RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("reservation {}", id)))
}

/// Lock a single live reservation for a status or slot change
pub async fn find_for_update(conn: &mut PgConnection, id: Uuid) -> Result<Option<Reservation>, DatabaseError> {
    let row = sqlx::query_as::<_, Reservation>(
        "SELECT * FROM reservations WHERE id = $1 AND NOT deleted FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

/// Lock a soft-deleted reservation ahead of a restore
pub async fn find_deleted_for_update(conn: &mut PgConnection, id: Uuid) -> Result<Option<Reservation>, DatabaseError> {
    let row = sqlx::query_as::<_, Reservation>(
        "SELECT * FROM reservations WHERE id = $1 AND deleted FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}
