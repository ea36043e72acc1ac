use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{FieldErrors, Validate, ValidationErrors};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Table {
    pub id: Uuid,
    pub number: i32,
    pub capacity: i32,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TableInput {
    pub number: Option<i32>,
    pub capacity: Option<i32>,
    pub location: Option<String>,
}

/// Checked table payload
#[derive(Debug, Clone, PartialEq)]
pub struct TableFields {
    pub number: i32,
    pub capacity: i32,
    pub location: Option<String>,
}

impl Validate for TableInput {
    type Valid = TableFields;

    fn validate(self) -> Result<TableFields, ValidationErrors> {
        let mut errors = FieldErrors::default();
        let number = errors.required_some("number", self.number);
        let capacity = errors.required_some("capacity", self.capacity);
        if let Some(number) = number {
            errors.at_least("number", number, 1);
        }
        if let Some(capacity) = capacity {
            errors.at_least("capacity", capacity, 1);
        }
        errors.max_length("location", self.location.as_deref(), 100);
        errors.finish()?;

        match (number, capacity) {
            (Some(number), Some(capacity)) => Ok(TableFields {
                number,
                capacity,
                location: self.location,
            }),
            _ => Err(ValidationErrors::single("table", "Incomplete table")),
        }
    }
}
