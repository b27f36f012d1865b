/// Habit entity and related functionality
/// 
/// This module defines the core Habit struct that represents a recurring
/// habit the user wants to track, along with its validation rules.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, HabitId, Periodicity};

/// A habit the user wants to perform regularly
/// 
/// The id and periodicity are fixed at creation; afterwards the habit only
/// changes by appending completion timestamps. Completions carry no identity
/// of their own - duplicates are allowed and each one counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name, unique across all habits
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// How often this habit should be performed
    pub periodicity: Periodicity,
    /// When this habit was created (local wall-clock time)
    pub created_at: NaiveDateTime,
    /// Completion timestamps in insertion order
    completions: Vec<NaiveDateTime>,
}

impl Habit {
    /// Create a new habit with validation, stamped with the current time
    pub fn new(
        name: String,
        periodicity: Periodicity,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::with_created_at(name, periodicity, description, Local::now().naive_local())
    }

    /// Create a new habit with an explicit creation timestamp
    /// 
    /// Used by the sample-data seeder, which backdates habits so that
    /// completion rates over the generated history are meaningful.
    pub fn with_created_at(
        name: String,
        periodicity: Periodicity,
        description: Option<String>,
        created_at: NaiveDateTime,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        Self::validate_description(&description)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            description,
            periodicity,
            created_at,
            completions: Vec::new(),
        })
    }

    /// Reconstruct a habit from stored data
    /// 
    /// This constructor assumes data was validated when first created and is
    /// used by the storage layer when loading habits from the database.
    pub fn from_existing(
        id: HabitId,
        name: String,
        description: Option<String>,
        periodicity: Periodicity,
        created_at: NaiveDateTime,
        completions: Vec<NaiveDateTime>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            periodicity,
            created_at,
            completions,
        }
    }

    /// Record one completion of this habit
    pub fn add_completion(&mut self, completed_at: NaiveDateTime) {
        self.completions.push(completed_at);
    }

    /// All completion timestamps, in insertion order
    /// 
    /// The analytics engine sorts defensively, so no ordering is promised.
    pub fn completions(&self) -> &[NaiveDateTime] {
        &self.completions
    }

    /// Number of recorded completions
    pub fn completion_count(&self) -> usize {
        self.completions.len()
    }

    // Validation helper methods

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_description(description: &Option<String>) -> Result<(), DomainError> {
        if let Some(desc) = description {
            if desc.len() > 500 {
                return Err(DomainError::Validation {
                    message: "Description cannot be longer than 500 characters".to_string(),
                });
            }
        }
        Ok(())
    }
}
