use sqlx::PgConnection;
use uuid::Uuid;

use super::Repository;
use crate::database::manager::DatabaseError;
use crate::database::models::{Ingredient, IngredientInput};

pub const INGREDIENTS: Repository<Ingredient> = Repository::new("ingredients", "ingredient");

pub async fn insert(conn: &mut PgConnection, input: &IngredientInput) -> Result<Ingredient, DatabaseError> {
    let ingredient = sqlx::query_as::<_, Ingredient>(
        "INSERT INTO ingredients (id, name, unit) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&input.name)
    .bind(&input.unit)
    .fetch_one(conn)
    .await?;
    Ok(ingredient)
}

pub async fn update(conn: &mut PgConnection, id: Uuid, input: &IngredientInput) -> Result<Ingredient, DatabaseError> {
    sqlx::query_as::<_, Ingredient>(
        "UPDATE ingredients SET name = $2, unit = $3, updated_at = now() \
         WHERE id = $1 AND NOT deleted RETURNING *",
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.unit)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("ingredient {}", id)))
}

/// Ingredients (deleted or not) for the given ids
pub async fn find_many(conn: &mut PgConnection, ids: &[Uuid]) -> Result<Vec<Ingredient>, DatabaseError> {
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let rows = sqlx::query_as::<_, Ingredient>("SELECT * FROM ingredients WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(conn)
        .await?;
    Ok(rows)
}
