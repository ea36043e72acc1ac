// Domain rules: reservation conflicts and portion availability.
//
// Both computations are pure: repositories fetch the data, the functions in
// this module decide, and the use-case layer persists or rejects.

pub mod portion;
pub mod reservation_conflict;

pub use portion::{IngredientPortions, PortionBreakdown, PortionCalculator};
pub use reservation_conflict::{ConflictCheck, ReservationConflictChecker};

use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::validation::ValidationErrors;

/// Errors raised by the core rules and the use-cases around them
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    /// Corrupt data or a broken invariant; never shown to clients verbatim
    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl DomainError {
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        DomainError::NotFound(format!("{} {} not found", what, id))
    }
}
