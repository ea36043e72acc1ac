use sqlx::PgConnection;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Recipe, RecipeFields, RecipeItem};

/// Recipe of a menu with its items in recipe order
pub async fn find_by_menu(conn: &mut PgConnection, menu_id: Uuid) -> Result<Option<Recipe>, DatabaseError> {
    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE menu_id = $1")
        .bind(menu_id)
        .fetch_optional(&mut *conn)
        .await?;

    let Some(mut recipe) = recipe else {
        return Ok(None);
    };
    recipe.items = items_for(conn, recipe.id).await?;
    Ok(Some(recipe))
}

async fn items_for(conn: &mut PgConnection, recipe_id: Uuid) -> Result<Vec<RecipeItem>, DatabaseError> {
    let items = sqlx::query_as::<_, RecipeItem>(
        "SELECT ingredient_id, quantity, position FROM recipe_items \
         WHERE recipe_id = $1 ORDER BY position",
    )
    .bind(recipe_id)
    .fetch_all(conn)
    .await?;
    Ok(items)
}

/// Create the menu's recipe or replace its fields and items
pub async fn upsert(conn: &mut PgConnection, menu_id: Uuid, fields: &RecipeFields) -> Result<Recipe, DatabaseError> {
    let mut recipe = sqlx::query_as::<_, Recipe>(
        "INSERT INTO recipes (id, menu_id, name, description) VALUES ($1, $2, $3, $4) \
         ON CONFLICT (menu_id) DO UPDATE SET name = EXCLUDED.name, \
         description = EXCLUDED.description, updated_at = now() RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(menu_id)
    .bind(&fields.name)
    .bind(&fields.description)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM recipe_items WHERE recipe_id = $1")
        .bind(recipe.id)
        .execute(&mut *conn)
        .await?;

    for item in &fields.items {
        sqlx::query(
            "INSERT INTO recipe_items (recipe_id, ingredient_id, quantity, position) VALUES ($1, $2, $3, $4)",
        )
        .bind(recipe.id)
        .bind(item.ingredient_id)
        .bind(item.quantity)
        .bind(item.position)
        .execute(&mut *conn)
        .await?;
    }

    recipe.items = items_for(conn, recipe.id).await?;
    Ok(recipe)
}

pub async fn delete_by_menu(conn: &mut PgConnection, menu_id: Uuid) -> Result<(), DatabaseError> {
    let result = sqlx::query("DELETE FROM recipes WHERE menu_id = $1")
        .bind(menu_id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("recipe for menu {}", menu_id)));
    }
    Ok(())
}
