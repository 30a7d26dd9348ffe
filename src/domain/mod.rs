/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, HabitProgress) and their
/// validation rules. Everything here is pure: no storage, no clock except
/// where a default creation date is needed.

pub mod habit;
pub mod progress;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use progress::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
