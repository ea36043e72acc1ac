pub mod manager;
pub mod models;
pub mod repository;
pub mod unit_of_work;

pub use manager::{Database, DatabaseError};
pub use unit_of_work::UnitOfWork;
