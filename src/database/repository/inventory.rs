use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use super::Repository;
use crate::database::manager::DatabaseError;
use crate::database::models::{Inventory, NewInventory};

pub const INVENTORIES: Repository<Inventory> = Repository::new("inventories", "inventory");

pub async fn insert(conn: &mut PgConnection, input: &NewInventory) -> Result<Inventory, DatabaseError> {
    let inventory = sqlx::query_as::<_, Inventory>(
        "INSERT INTO inventories (id, ingredient_id, quantity) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(input.ingredient_id)
    .bind(input.quantity)
    .fetch_one(conn)
    .await?;
    Ok(inventory)
}

pub async fn update_quantity(conn: &mut PgConnection, id: Uuid, quantity: Decimal) -> Result<Inventory, DatabaseError> {
    sqlx::query_as::<_, Inventory>(
        "UPDATE inventories SET quantity = $2, updated_at = now() \
         WHERE id = $1 AND NOT deleted RETURNING *",
    )
    .bind(id)
    .bind(quantity)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("inventory {}", id)))
}

/// Live stock row for one ingredient
pub async fn find_by_ingredient(conn: &mut PgConnection, ingredient_id: Uuid) -> Result<Option<Inventory>, DatabaseError> {
    let row = sqlx::query_as::<_, Inventory>(
        "SELECT * FROM inventories WHERE ingredient_id = $1 AND NOT deleted",
    )
    .bind(ingredient_id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}
