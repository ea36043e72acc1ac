pub mod ingredient;
pub mod inventory;
pub mod menu;
pub mod recipe;
pub mod reservation;
pub mod table;
pub mod user;

pub use ingredient::{Ingredient, IngredientInput};
pub use inventory::{CreateInventoryInput, Inventory, NewInventory, UpdateInventoryInput};
pub use menu::{Menu, MenuInput};
pub use recipe::{Recipe, RecipeFields, RecipeInput, RecipeItem};
pub use reservation::{
    CreateReservationInput, NewReservation, Reservation, ReservationChanges, ReservationFilter,
    ReservationQuery, ReservationStatus, StatusChangeInput, UpdateReservationInput,
};
pub use table::{Table, TableFields, TableInput};
pub use user::{LoginInput, RegisterInput, User, UserRole};
