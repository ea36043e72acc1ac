use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, error};
use uuid::Uuid;

use crate::database::models::{Ingredient, Inventory, Menu, Recipe};
use crate::database::repository::{ingredient, inventory, menu, recipe};
use crate::database::{DatabaseError, UnitOfWork};
use crate::domain::{DomainError, PortionCalculator};

/// Data access needed to compute portions for a menu
#[async_trait]
pub trait InventoryStore: Send {
    async fn find_menu(&mut self, menu_id: Uuid) -> Result<Option<Menu>, DatabaseError>;
    async fn recipe_for_menu(&mut self, menu_id: Uuid) -> Result<Option<Recipe>, DatabaseError>;
    async fn inventory_for_ingredient(&mut self, ingredient_id: Uuid) -> Result<Option<Inventory>, DatabaseError>;
    /// Live ingredients among `ids`
    async fn ingredients(&mut self, ids: &[Uuid]) -> Result<Vec<Ingredient>, DatabaseError>;
}

#[async_trait]
impl InventoryStore for UnitOfWork {
    async fn find_menu(&mut self, menu_id: Uuid) -> Result<Option<Menu>, DatabaseError> {
        menu::MENUS.select_one(self.conn(), menu_id).await
    }

    async fn recipe_for_menu(&mut self, menu_id: Uuid) -> Result<Option<Recipe>, DatabaseError> {
        recipe::find_by_menu(self.conn(), menu_id).await
    }

    async fn inventory_for_ingredient(&mut self, ingredient_id: Uuid) -> Result<Option<Inventory>, DatabaseError> {
        inventory::find_by_ingredient(self.conn(), ingredient_id).await
    }

    async fn ingredients(&mut self, ids: &[Uuid]) -> Result<Vec<Ingredient>, DatabaseError> {
        let rows = ingredient::find_many(self.conn(), ids).await?;
        Ok(rows.into_iter().filter(|i| !i.deleted).collect())
    }
}

/// One recipe ingredient as seen by the portion calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientStock {
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub unit: String,
    pub required_per_portion: Decimal,
    pub available: Decimal,
    pub portions: i64,
    /// False when no inventory row exists and the stock was taken as zero
    pub has_inventory: bool,
}

/// Portions a menu can currently produce, with the inputs that decided it
#[derive(Debug, Clone, Serialize)]
pub struct InventoryMenu {
    pub portions: i64,
    pub limiting_ingredient: Uuid,
    pub menu: Menu,
    pub recipe: Recipe,
    pub ingredients: Vec<IngredientStock>,
}

pub struct InventoryService;

impl InventoryService {
    pub async fn portions_for_menu<S>(store: &mut S, menu_id: Uuid) -> Result<InventoryMenu, DomainError>
    where
        S: InventoryStore + ?Sized,
    {
        let menu = store
            .find_menu(menu_id)
            .await?
            .ok_or_else(|| DomainError::not_found("menu", menu_id))?;
        let recipe = store
            .recipe_for_menu(menu_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("recipe for menu {} not found", menu_id)))?;

        let ids: Vec<Uuid> = recipe.items.iter().map(|item| item.ingredient_id).collect();
        let known: HashMap<Uuid, Ingredient> = store
            .ingredients(&ids)
            .await?
            .into_iter()
            .map(|i| (i.id, i))
            .collect();
        if let Some(missing) = ids.iter().find(|id| !known.contains_key(*id)) {
            return Err(DomainError::not_found("ingredient", missing));
        }

        let mut stock = HashMap::with_capacity(ids.len());
        for id in &ids {
            if let Some(row) = store.inventory_for_ingredient(*id).await? {
                stock.insert(*id, row.quantity);
            }
        }

        let breakdown = PortionCalculator::calculate(&recipe.items, &stock).map_err(|err| {
            if let DomainError::Internal(reason) = &err {
                error!("Portion calculation failed for menu {} (recipe {}): {}", menu_id, recipe.id, reason);
            }
            err
        })?;
        debug!(
            "Menu {} can produce {} portions, limited by {}",
            menu_id, breakdown.portions, breakdown.limiting_ingredient
        );

        let ingredients = breakdown
            .ingredients
            .into_iter()
            .filter_map(|p| {
                let info = known.get(&p.ingredient_id)?;
                Some(IngredientStock {
                    ingredient_id: p.ingredient_id,
                    ingredient_name: info.name.clone(),
                    unit: info.unit.clone(),
                    required_per_portion: p.required_per_portion,
                    available: p.available,
                    portions: p.portions,
                    has_inventory: stock.contains_key(&p.ingredient_id),
                })
            })
            .collect();

        Ok(InventoryMenu {
            portions: breakdown.portions,
            limiting_ingredient: breakdown.limiting_ingredient,
            menu,
            recipe,
            ingredients,
        })
    }
}
