/// Public library interface for the habit tracker
/// 
/// This module wires the SQLite store to the analytics engine and exports
/// the public types used by the CLI and by tests.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use thiserror::Error;

// Internal modules
mod analytics;
mod domain;
mod seed;
mod storage;

// Re-export public modules and types
pub use analytics::*;
pub use domain::*;
pub use seed::{seed_default_habits, DEFAULT_HABITS};
pub use storage::{HabitStorage, SqliteStorage, StorageError};

/// Errors that can occur while operating the tracker
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The habit tracker: a repository of habits plus the analytics on top
/// 
/// Owns the storage layer and passes loaded habits to the pure analytics
/// functions. Habits are created once and only ever grow by appended
/// completions; statistics are recomputed from scratch on every call.
pub struct HabitTracker {
    storage: SqliteStorage,
}

impl HabitTracker {
    /// Open (or create) a tracker backed by the given database file
    pub fn new(db_path: PathBuf) -> Result<Self, TrackerError> {
        tracing::info!("Opening habit tracker database: {:?}", db_path);
        let storage = SqliteStorage::new(db_path)?;
        Ok(Self { storage })
    }

    /// Create a new habit
    pub fn create_habit(
        &self,
        name: String,
        periodicity: Periodicity,
        description: Option<String>,
    ) -> Result<Habit, TrackerError> {
        let habit = Habit::new(name, periodicity, description)?;
        self.storage.create_habit(&habit)?;
        Ok(habit)
    }

    /// Record a completion for the named habit
    /// 
    /// Uses the current wall-clock time when no timestamp is given.
    pub fn complete_habit(
        &self,
        name: &str,
        completed_at: Option<NaiveDateTime>,
    ) -> Result<(), TrackerError> {
        let habit = self.storage.get_habit_by_name(name)?;
        let completed_at = completed_at.unwrap_or_else(|| Local::now().naive_local());
        self.storage.add_completion(&habit.id, completed_at)?;
        Ok(())
    }

    /// Load one habit by name, completions included
    pub fn habit(&self, name: &str) -> Result<Habit, TrackerError> {
        Ok(self.storage.get_habit_by_name(name)?)
    }

    /// Load all habits, optionally filtered by periodicity
    pub fn habits(&self, periodicity: Option<Periodicity>) -> Result<Vec<Habit>, TrackerError> {
        Ok(self.storage.list_habits(periodicity)?)
    }

    /// Statistics for one habit
    pub fn stats_for(&self, name: &str) -> Result<Stats, TrackerError> {
        let habit = self.habit(name)?;
        Ok(analytics::analyze_habit(&habit))
    }

    /// Statistics for every habit, keyed by name
    pub fn stats_all(&self) -> Result<HashMap<String, Stats>, TrackerError> {
        let habits = self.habits(None)?;
        Ok(analytics::analyze_all(&habits))
    }

    /// Reports for the habits with the given periodicity, in listing order
    pub fn stats_by_periodicity(
        &self,
        periodicity: Periodicity,
    ) -> Result<Vec<HabitReport>, TrackerError> {
        let habits = self.habits(None)?;
        Ok(analytics::habits_by_periodicity(&habits, periodicity))
    }

    /// Longest streak per habit, keyed by name
    pub fn longest_streaks(&self) -> Result<HashMap<String, u32>, TrackerError> {
        let habits = self.habits(None)?;
        Ok(analytics::longest_streaks(&habits))
    }

    /// Improvement suggestions for one habit
    pub fn suggestions_for(&self, name: &str) -> Result<Vec<String>, TrackerError> {
        let stats = self.stats_for(name)?;
        Ok(analytics::improvement_suggestions(&stats))
    }

    /// Seed the default habits with generated history
    pub fn seed(&self, days_of_history: i64) -> Result<usize, TrackerError> {
        seed::seed_default_habits(&self.storage, days_of_history)
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }
}
