use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{FieldErrors, Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Staff,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterInput {
    type Valid = RegisterInput;

    fn validate(mut self) -> Result<RegisterInput, ValidationErrors> {
        self.email = self.email.trim().to_lowercase();
        let mut errors = FieldErrors::default();
        if errors.required("name", &self.name) {
            errors.length("name", &self.name, 1, 100);
        }
        if errors.required("email", &self.email) {
            errors.email("email", &self.email);
        }
        if errors.required("password", &self.password) {
            errors.length("password", &self.password, 8, 128);
        }
        errors.finish()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl Validate for LoginInput {
    type Valid = LoginInput;

    fn validate(mut self) -> Result<LoginInput, ValidationErrors> {
        self.email = self.email.trim().to_lowercase();
        let mut errors = FieldErrors::default();
        errors.required("email", &self.email);
        errors.required("password", &self.password);
        errors.finish()?;
        Ok(self)
    }
}
