use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{FieldErrors, Validate, ValidationErrors, QUANTITY_COLUMN};

/// Stock on hand for one ingredient
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Inventory {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    pub quantity: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateInventoryInput {
    pub ingredient_id: Option<Uuid>,
    pub quantity: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInventory {
    pub ingredient_id: Uuid,
    pub quantity: Decimal,
}

impl Validate for CreateInventoryInput {
    type Valid = NewInventory;

    fn validate(self) -> Result<NewInventory, ValidationErrors> {
        let mut errors = FieldErrors::default();
        let ingredient_id = errors.required_some("ingredient_id", self.ingredient_id);
        let quantity = errors.required_some("quantity", self.quantity);
        if let Some(quantity) = quantity {
            errors.non_negative("quantity", quantity);
            errors.fits("quantity", quantity, QUANTITY_COLUMN);
        }
        errors.finish()?;

        match (ingredient_id, quantity) {
            (Some(ingredient_id), Some(quantity)) => Ok(NewInventory { ingredient_id, quantity }),
            _ => Err(ValidationErrors::single("inventory", "Incomplete inventory")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateInventoryInput {
    pub quantity: Option<Decimal>,
}

impl Validate for UpdateInventoryInput {
    type Valid = Decimal;

    fn validate(self) -> Result<Decimal, ValidationErrors> {
        let mut errors = FieldErrors::default();
        let quantity = errors.required_some("quantity", self.quantity);
        if let Some(quantity) = quantity {
            errors.non_negative("quantity", quantity);
            errors.fits("quantity", quantity, QUANTITY_COLUMN);
        }
        errors.finish()?;
        quantity.ok_or_else(|| ValidationErrors::single("quantity", "This field is required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_must_fit_the_quantity_column() {
        let fine = CreateInventoryInput {
            ingredient_id: Some(Uuid::new_v4()),
            quantity: Some(Decimal::new(12345, 4)),
        };
        assert!(fine.validate().unwrap_err().field_errors.contains_key("quantity"));

        let huge = UpdateInventoryInput {
            quantity: Some(Decimal::from(500_000_000_000u64)),
        };
        assert!(huge.validate().unwrap_err().field_errors.contains_key("quantity"));

        let ok = UpdateInventoryInput {
            quantity: Some(Decimal::new(2500, 3)),
        };
        assert_eq!(ok.validate().unwrap(), Decimal::new(2500, 3));
    }
}
