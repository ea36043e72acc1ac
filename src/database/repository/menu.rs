use sqlx::PgConnection;
use uuid::Uuid;

use super::Repository;
use crate::database::manager::DatabaseError;
use crate::database::models::{Menu, MenuInput};

pub const MENUS: Repository<Menu> = Repository::new("menus", "menu");

pub async fn insert(conn: &mut PgConnection, input: &MenuInput) -> Result<Menu, DatabaseError> {
    let menu = sqlx::query_as::<_, Menu>(
        "INSERT INTO menus (id, name, description, price, category, image_url) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(&input.category)
    .bind(&input.image_url)
    .fetch_one(conn)
    .await?;
    Ok(menu)
}

pub async fn update(conn: &mut PgConnection, id: Uuid, input: &MenuInput) -> Result<Menu, DatabaseError> {
    sqlx::query_as::<_, Menu>(
        "UPDATE menus SET name = $2, description = $3, price = $4, category = $5, image_url = $6, \
         updated_at = now() WHERE id = $1 AND NOT deleted RETURNING *",
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(&input.category)
    .bind(&input.image_url)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("menu {}", id)))
}
