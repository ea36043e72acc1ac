// Use-cases: each runs inside one `UnitOfWork` opened by the handler and
// reaches storage only through the store traits or repository functions.

pub mod auth_service;
pub mod catalog_service;
pub mod inventory_service;
pub mod reservation_service;

pub use auth_service::{AccountError, LoginResponse};
pub use inventory_service::{IngredientStock, InventoryMenu, InventoryService, InventoryStore};
pub use reservation_service::{ReservationService, ReservationStore};
