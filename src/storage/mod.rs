/// Storage layer for persisting habit data
/// 
/// This module handles all database operations using SQLite. It provides
/// a clean interface for storing and retrieving habits and their
/// completion timestamps. Statistics are never stored - the analytics
/// engine recomputes them on demand.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::{Habit, HabitId, Periodicity};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit}")]
    HabitNotFound { habit: String },

    #[error("A habit named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for habits
/// 
/// This trait allows swapping SQLite for another store while keeping the
/// same interface, and lets the seeder and tests run against anything that
/// implements it.
pub trait HabitStorage {
    /// Persist a new habit (without completions)
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Load a habit by ID, completions included
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError>;

    /// Load a habit by its unique name, completions included
    fn get_habit_by_name(&self, name: &str) -> Result<Habit, StorageError>;

    /// Load all habits, optionally filtered by periodicity,
    /// completions included
    fn list_habits(&self, periodicity: Option<Periodicity>) -> Result<Vec<Habit>, StorageError>;

    /// Record one completion for a habit
    fn add_completion(
        &self,
        habit_id: &HabitId,
        completed_at: NaiveDateTime,
    ) -> Result<(), StorageError>;

    /// All completion timestamps for a habit, oldest first
    fn completions_for_habit(
        &self,
        habit_id: &HabitId,
    ) -> Result<Vec<NaiveDateTime>, StorageError>;
}
