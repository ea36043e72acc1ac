use sqlx::PgConnection;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{User, UserRole};

/// Advisory lock key serializing account creation
const REGISTRATION_LOCK: i64 = 0x7573_6572_7265_6769;

pub async fn insert(
    conn: &mut PgConnection,
    name: &str,
    email: &str,
    password_hash: &str,
    role: UserRole,
) -> Result<User, DatabaseError> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, name, email, password_hash, role) VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(conn)
    .await?;
    Ok(user)
}

pub async fn find_by_email(conn: &mut PgConnection, email: &str) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(conn)
        .await?;
    Ok(user)
}

pub async fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(user)
}

/// Whether any staff account exists yet
pub async fn has_staff(conn: &mut PgConnection) -> Result<bool, DatabaseError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE role = 'staff')")
        .fetch_one(conn)
        .await?;
    Ok(exists)
}

/// Hold the registration lock until the surrounding transaction ends, so the
/// staff bootstrap check and the insert cannot interleave across requests
pub async fn lock_registrations(conn: &mut PgConnection) -> Result<(), DatabaseError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(REGISTRATION_LOCK)
        .execute(conn)
        .await?;
    Ok(())
}
