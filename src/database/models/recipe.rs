use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use uuid::Uuid;

use crate::validation::{FieldErrors, Validate, ValidationErrors, QUANTITY_COLUMN};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Loaded separately from recipe_items, ordered by position
    #[sqlx(skip)]
    pub items: Vec<RecipeItem>,
}

/// Quantity of one ingredient needed for a single portion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecipeItem {
    pub ingredient_id: Uuid,
    pub quantity: Decimal,
    pub position: i32,
}

/// PUT /api/menus/:id/recipe body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecipeInput {
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<RecipeItemInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecipeItemInput {
    pub ingredient_id: Option<Uuid>,
    pub quantity: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeFields {
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<RecipeItem>,
}

impl Validate for RecipeInput {
    type Valid = RecipeFields;

    fn validate(self) -> Result<RecipeFields, ValidationErrors> {
        let mut errors = FieldErrors::default();
        if errors.required("name", &self.name) {
            errors.length("name", &self.name, 1, 100);
        }
        if self.items.is_empty() {
            errors.add("items", "A recipe needs at least one ingredient");
        }

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.into_iter().enumerate() {
            let ingredient_id = errors.required_some(&format!("items[{}].ingredient_id", index), item.ingredient_id);
            let quantity = errors.required_some(&format!("items[{}].quantity", index), item.quantity);
            if let Some(quantity) = quantity {
                let field = format!("items[{}].quantity", index);
                errors.positive(&field, quantity);
                errors.fits(&field, quantity, QUANTITY_COLUMN);
            }
            if let Some(id) = ingredient_id {
                if !seen.insert(id) {
                    errors.add(&format!("items[{}].ingredient_id", index), "Duplicate ingredient");
                }
            }
            if let (Some(ingredient_id), Some(quantity)) = (ingredient_id, quantity) {
                items.push(RecipeItem {
                    ingredient_id,
                    quantity,
                    position: index as i32,
                });
            }
        }
        errors.finish()?;

        Ok(RecipeFields {
            name: self.name,
            description: self.description,
            items,
        })
    }
}
