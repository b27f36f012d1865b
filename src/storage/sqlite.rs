/// SQLite implementation of the habit storage interface
/// 
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habit data. Timestamps are stored as ISO-8601 text via
/// rusqlite's chrono integration.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

use crate::domain::{Habit, HabitId, Periodicity};
use crate::storage::{migrations, HabitStorage, StorageError};

/// SQLite-based storage implementation
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    /// 
    /// Opens the database file and runs any necessary migrations to bring
    /// the schema up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Map a habits-table row to a Habit without its completions
    fn habit_from_row(row: &Row<'_>) -> Result<Habit, rusqlite::Error> {
        let id_str: String = row.get(0)?;
        let id = HabitId::from_string(&id_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(0, "id".to_string(), rusqlite::types::Type::Text)
        })?;

        let periodicity_str: String = row.get(2)?;
        let periodicity: Periodicity = periodicity_str.parse().map_err(|_| {
            rusqlite::Error::InvalidColumnType(
                2,
                "periodicity".to_string(),
                rusqlite::types::Type::Text,
            )
        })?;

        Ok(Habit::from_existing(
            id,
            row.get(1)?, // name
            row.get(3)?, // description
            periodicity,
            row.get(4)?, // created_at
            Vec::new(),
        ))
    }

    /// Attach the stored completions to a freshly loaded habit
    fn with_completions(&self, mut habit: Habit) -> Result<Habit, StorageError> {
        let completions = self.completions_for_habit(&habit.id)?;
        for completed_at in completions {
            habit.add_completion(completed_at);
        }
        Ok(habit)
    }
}

impl HabitStorage for SqliteStorage {
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let result = self.conn.execute(
            "INSERT INTO habits (id, name, periodicity, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                habit.id.to_string(),
                habit.name,
                habit.periodicity.as_str(),
                habit.description,
                habit.created_at,
            ],
        );

        match result {
            Ok(_) => {
                tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::DuplicateName {
                    name: habit.name.clone(),
                })
            }
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, periodicity, description, created_at
             FROM habits WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![habit_id.to_string()], Self::habit_from_row);

        match result {
            Ok(habit) => self.with_completions(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::HabitNotFound {
                habit: habit_id.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn get_habit_by_name(&self, name: &str) -> Result<Habit, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, periodicity, description, created_at
             FROM habits WHERE name = ?1",
        )?;

        let result = stmt.query_row(params![name], Self::habit_from_row);

        match result {
            Ok(habit) => self.with_completions(habit),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StorageError::HabitNotFound {
                habit: name.to_string(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn list_habits(&self, periodicity: Option<Periodicity>) -> Result<Vec<Habit>, StorageError> {
        let mut sql = "SELECT id, name, periodicity, description, created_at FROM habits".to_string();
        if periodicity.is_some() {
            sql.push_str(" WHERE periodicity = ?1");
        }
        sql.push_str(" ORDER BY created_at, name");

        let mut stmt = self.conn.prepare(&sql)?;

        let rows: Vec<Habit> = match periodicity {
            Some(p) => stmt
                .query_map(params![p.as_str()], Self::habit_from_row)?
                .collect::<Result<_, _>>()?,
            None => stmt
                .query_map([], Self::habit_from_row)?
                .collect::<Result<_, _>>()?,
        };

        let mut habits = Vec::with_capacity(rows.len());
        for habit in rows {
            habits.push(self.with_completions(habit)?);
        }

        Ok(habits)
    }

    fn add_completion(
        &self,
        habit_id: &HabitId,
        completed_at: NaiveDateTime,
    ) -> Result<(), StorageError> {
        // Verify the habit exists so the error is a HabitNotFound rather
        // than a foreign-key failure
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM habits WHERE id = ?1)",
            params![habit_id.to_string()],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StorageError::HabitNotFound {
                habit: habit_id.to_string(),
            });
        }

        self.conn.execute(
            "INSERT INTO completions (habit_id, completed_at) VALUES (?1, ?2)",
            params![habit_id.to_string(), completed_at],
        )?;

        tracing::debug!("Recorded completion for habit {}", habit_id);
        Ok(())
    }

    fn completions_for_habit(
        &self,
        habit_id: &HabitId,
    ) -> Result<Vec<NaiveDateTime>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT completed_at FROM completions
             WHERE habit_id = ?1
             ORDER BY completed_at",
        )?;

        let completions = stmt
            .query_map(params![habit_id.to_string()], |row| row.get(0))?
            .collect::<Result<Vec<NaiveDateTime>, _>>()?;

        Ok(completions)
    }
}
