use sqlx::PgConnection;
use tracing::{info, warn};
use uuid::Uuid;

use crate::database::models::{Inventory, NewInventory, Recipe, RecipeFields};
use crate::database::repository::{ingredient, inventory, menu, recipe};
use crate::domain::DomainError;

/// Stock rows always point at a live ingredient
pub async fn create_inventory(conn: &mut PgConnection, new: &NewInventory) -> Result<Inventory, DomainError> {
    if !ingredient::INGREDIENTS.exists(&mut *conn, new.ingredient_id).await? {
        return Err(DomainError::not_found("ingredient", new.ingredient_id));
    }
    if inventory::find_by_ingredient(&mut *conn, new.ingredient_id).await?.is_some() {
        return Err(DomainError::Conflict(format!(
            "ingredient {} already has an inventory entry",
            new.ingredient_id
        )));
    }

    let created = inventory::insert(conn, new).await?;
    info!("Inventory {} created for ingredient {}", created.id, created.ingredient_id);
    Ok(created)
}

/// Create or replace a menu's recipe after checking every referenced ingredient
pub async fn replace_recipe(conn: &mut PgConnection, menu_id: Uuid, fields: &RecipeFields) -> Result<Recipe, DomainError> {
    if !menu::MENUS.exists(&mut *conn, menu_id).await? {
        return Err(DomainError::not_found("menu", menu_id));
    }

    let ids: Vec<Uuid> = fields.items.iter().map(|item| item.ingredient_id).collect();
    let live: Vec<Uuid> = ingredient::find_many(&mut *conn, &ids)
        .await?
        .into_iter()
        .filter(|i| !i.deleted)
        .map(|i| i.id)
        .collect();
    if let Some(missing) = ids.iter().find(|id| !live.contains(id)) {
        warn!("Recipe for menu {} references unknown ingredient {}", menu_id, missing);
        return Err(DomainError::not_found("ingredient", missing));
    }

    let saved = recipe::upsert(conn, menu_id, fields).await?;
    info!("Recipe {} saved for menu {} with {} items", saved.id, menu_id, saved.items.len());
    Ok(saved)
}
