use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{FieldErrors, Validate, ValidationErrors};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IngredientInput {
    pub name: String,
    pub unit: String,
}

impl Validate for IngredientInput {
    type Valid = IngredientInput;

    fn validate(self) -> Result<IngredientInput, ValidationErrors> {
        let mut errors = FieldErrors::default();
        if errors.required("name", &self.name) {
            errors.length("name", &self.name, 1, 100);
        }
        if errors.required("unit", &self.unit) {
            errors.length("unit", &self.unit, 1, 20);
        }
        errors.finish()?;
        Ok(self)
    }
}
