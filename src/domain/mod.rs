/// Domain module containing the core entities and their validation rules
/// 
/// This module defines the Habit entity together with the identifier and
/// periodicity types the rest of the system is built around.

pub mod habit;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid periodicity: {0}")]
    InvalidPeriodicity(String),
}
