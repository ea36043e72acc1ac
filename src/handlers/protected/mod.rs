// Protected handlers: every route here sits behind `jwt_auth_middleware`
// and receives the caller as `Extension<AuthUser>`.

pub mod auth;
pub mod ingredients;
pub mod inventories;
pub mod menus;
pub mod recipes;
pub mod reservations;
pub mod tables;

use serde::Deserialize;

use crate::auth::AuthUser;

/// `?include_deleted=true` on list routes; honoured for staff only
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub include_deleted: bool,
}

impl ListQuery {
    pub fn include_deleted_for(&self, user: &AuthUser) -> bool {
        self.include_deleted && user.is_staff()
    }
}
