/// Analytics engine for habit statistics and improvement suggestions
/// 
/// This is a pure function library: every computation is a deterministic
/// function of the habit data and a single wall-clock reading captured at
/// the start of the invocation. Nothing here touches storage or keeps
/// state, and nothing is cached - stats are recomputed on demand.

pub mod calendar;
pub mod metrics;

pub use calendar::{adjacent, last_iso_week, same_period};
pub use metrics::{break_count, completion_rate, streaks, StreakSummary};

use std::collections::HashMap;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{Habit, Periodicity};

/// Derived statistics for one habit
/// 
/// Always recomputed from the completion list and creation date; never
/// persisted or incrementally updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Total number of recorded completions, duplicates included
    pub total_completions: u32,
    /// Streak ending at the most recent completion, 0 if lapsed
    pub current_streak: u32,
    /// Longest streak ever observed
    pub longest_streak: u32,
    /// Percentage of elapsed periods with at least one completion
    pub completion_rate: f64,
    /// Non-adjacent pairs in the sorted completion sequence
    pub break_count: u32,
    /// Most recent completion timestamp, if any
    pub last_completed: Option<NaiveDateTime>,
    /// The habit's periodicity, carried for display and suggestions
    pub periodicity: Periodicity,
}

/// A habit name paired with its computed statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitReport {
    pub name: String,
    pub stats: Stats,
}

/// Analyze a single habit against the current wall clock
pub fn analyze_habit(habit: &Habit) -> Stats {
    analyze_habit_at(habit, Local::now().naive_local())
}

/// Analyze a single habit against an explicit "now"
/// 
/// The timestamp is threaded through every internal step, so two calls with
/// the same inputs and the same `now` return identical results.
pub fn analyze_habit_at(habit: &Habit, now: NaiveDateTime) -> Stats {
    let completions = habit.completions();
    let summary = metrics::streaks(completions, habit.periodicity, now.date());

    Stats {
        total_completions: completions.len() as u32,
        current_streak: summary.current,
        longest_streak: summary.longest,
        completion_rate: metrics::completion_rate(
            completions,
            habit.created_at,
            habit.periodicity,
            now,
        ),
        break_count: metrics::break_count(completions, habit.periodicity),
        last_completed: completions.iter().max().copied(),
        periodicity: habit.periodicity,
    }
}

/// Analyze every habit, keyed by name
/// 
/// One wall-clock reading covers the whole batch so the reports are
/// mutually consistent.
pub fn analyze_all(habits: &[Habit]) -> HashMap<String, Stats> {
    let now = Local::now().naive_local();
    habits
        .iter()
        .map(|habit| (habit.name.clone(), analyze_habit_at(habit, now)))
        .collect()
}

/// Analyze the habits matching a predicate, preserving input order
pub fn analyze_filtered<P>(habits: &[Habit], predicate: P) -> Vec<HabitReport>
where
    P: Fn(&Habit) -> bool,
{
    let now = Local::now().naive_local();
    habits
        .iter()
        .filter(|habit| predicate(habit))
        .map(|habit| HabitReport {
            name: habit.name.clone(),
            stats: analyze_habit_at(habit, now),
        })
        .collect()
}

/// Analyze the habits with the given periodicity
pub fn habits_by_periodicity(habits: &[Habit], periodicity: Periodicity) -> Vec<HabitReport> {
    analyze_filtered(habits, |habit| habit.periodicity == periodicity)
}

/// Longest streak per habit, keyed by name
pub fn longest_streaks(habits: &[Habit]) -> HashMap<String, u32> {
    let now = Local::now().naive_local();
    habits
        .iter()
        .map(|habit| {
            let summary = metrics::streaks(habit.completions(), habit.periodicity, now.date());
            (habit.name.clone(), summary.longest)
        })
        .collect()
}

/// Generate improvement suggestions for a stats record
/// 
/// The rules are an ordered list of independent condition/message pairs:
/// every matching rule fires, in order, with no short-circuiting.
pub fn improvement_suggestions(stats: &Stats) -> Vec<String> {
    let rules: [(fn(&Stats) -> bool, fn(&Stats) -> String); 4] = [
        (
            |s| s.completion_rate < 30.0,
            |_| "Consider making this habit easier or breaking it into smaller steps".to_string(),
        ),
        (
            |s| s.completion_rate < 70.0,
            |_| "You're making progress! Try setting specific times for this habit".to_string(),
        ),
        (
            |s| (s.current_streak as f64) < s.longest_streak as f64 / 2.0,
            |s| {
                format!(
                    "You've had a longer streak ({} {})! Try to beat your record",
                    s.longest_streak,
                    s.periodicity.unit_name()
                )
            },
        ),
        (
            |s| s.break_count as f64 > s.total_completions as f64 / 3.0,
            |_| "Consider setting reminders to maintain consistency".to_string(),
        ),
    ];

    rules
        .iter()
        .filter(|(condition, _)| condition(stats))
        .map(|(_, message)| message(stats))
        .collect()
}
