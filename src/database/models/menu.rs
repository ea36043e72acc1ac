use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{FieldErrors, Validate, ValidationErrors, PRICE_COLUMN};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Menu {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create and full-update body for /api/menus
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MenuInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl Validate for MenuInput {
    type Valid = MenuInput;

    fn validate(self) -> Result<MenuInput, ValidationErrors> {
        let mut errors = FieldErrors::default();
        if errors.required("name", &self.name) {
            errors.length("name", &self.name, 1, 100);
        }
        if let Some(price) = errors.required_some("price", self.price) {
            errors.non_negative("price", price);
            errors.fits("price", price, PRICE_COLUMN);
        }
        errors.max_length("category", self.category.as_deref(), 50);
        errors.max_length("image_url", self.image_url.as_deref(), 2048);
        errors.finish()?;
        Ok(self)
    }
}
