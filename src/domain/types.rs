/// Core identifier and periodicity types used throughout the domain layer
/// 
/// This module defines the fundamental types like HabitId and Periodicity
/// that are used by Habit and the analytics engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
/// 
/// This is a wrapper around UUID to provide type safety - a habit ID can't
/// be confused with any other string floating through the system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a habit ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How often a habit is meant to be performed
/// 
/// The periodicity is fixed when the habit is created and drives every
/// analytics computation: which dates count as consecutive, how long the
/// grace period is before a streak lapses, and how elapsed periods are
/// counted for the completion rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    /// Every single day
    Daily,
    /// Once per ISO week
    Weekly,
}

/// The periodicities accepted by [`Periodicity::from_str`], in display form.
pub const VALID_PERIODICITIES: [&str; 2] = ["daily", "weekly"];

impl Periodicity {
    /// Lowercase name as stored in the database and shown to users
    pub fn as_str(&self) -> &'static str {
        match self {
            Periodicity::Daily => "daily",
            Periodicity::Weekly => "weekly",
        }
    }

    /// How many days may pass after the newest completion before the
    /// current streak is considered lapsed
    pub fn grace_days(&self) -> i64 {
        match self {
            Periodicity::Daily => 1,
            Periodicity::Weekly => 7,
        }
    }

    /// Unit name for streak lengths in user-facing messages
    pub fn unit_name(&self) -> &'static str {
        match self {
            Periodicity::Daily => "days",
            Periodicity::Weekly => "weeks",
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Periodicity::Daily),
            "weekly" => Ok(Periodicity::Weekly),
            other => Err(DomainError::InvalidPeriodicity(format!(
                "'{}' is not a valid periodicity. Must be one of: {}",
                other,
                VALID_PERIODICITIES.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_periodicities() {
        assert_eq!("daily".parse::<Periodicity>().unwrap(), Periodicity::Daily);
        assert_eq!("weekly".parse::<Periodicity>().unwrap(), Periodicity::Weekly);
        assert_eq!("Weekly".parse::<Periodicity>().unwrap(), Periodicity::Weekly);
    }

    #[test]
    fn test_parse_invalid_periodicity_lists_allowed_values() {
        let err = "monthly".parse::<Periodicity>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("daily"));
        assert!(message.contains("weekly"));
    }

    #[test]
    fn test_grace_days() {
        assert_eq!(Periodicity::Daily.grace_days(), 1);
        assert_eq!(Periodicity::Weekly.grace_days(), 7);
    }

    #[test]
    fn test_display_round_trips() {
        for p in [Periodicity::Daily, Periodicity::Weekly] {
            assert_eq!(p.to_string().parse::<Periodicity>().unwrap(), p);
        }
    }
}
