/// Streak, completion-rate, and break calculators
/// 
/// Pure functions over a habit's completion timestamps. Input order is
/// never trusted - every calculator sorts defensively - and "now" is always
/// passed in explicitly so a whole engine invocation sees one single
/// wall-clock reading.

use chrono::{NaiveDate, NaiveDateTime};

use crate::analytics::calendar::{adjacent, distinct_period_dates};
use crate::domain::Periodicity;

/// Current and longest streak lengths, counted in periods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakSummary {
    /// Length of the streak ending at the most recent completion,
    /// 0 if the habit has lapsed past its grace period
    pub current: u32,
    /// Longest run of adjacent periods ever observed
    pub longest: u32,
}

/// Calculate current and longest streaks for a set of completions
/// 
/// Completions are collapsed to distinct periods first, so streak lengths
/// count days or weeks rather than raw completions. The current streak is 0
/// when the newest completion is more than the periodicity's grace period
/// (1 day daily, 7 days weekly) before `today`; otherwise it is the run of
/// adjacent periods ending at the newest completion.
pub fn streaks(
    completions: &[NaiveDateTime],
    periodicity: Periodicity,
    today: NaiveDate,
) -> StreakSummary {
    let periods = distinct_period_dates(completions, periodicity);
    if periods.is_empty() {
        return StreakSummary::default();
    }

    let mut longest: u32 = 1;
    let mut run: u32 = 1;
    for pair in periods.windows(2) {
        if adjacent(periodicity, pair[0], pair[1]) {
            run += 1;
        } else {
            run = 1;
        }
        longest = longest.max(run);
    }

    // Grace check uses the newest completion date itself, not the period
    // representative, which for weekly habits can sit days earlier.
    let last_date = completions
        .iter()
        .map(|ts| ts.date())
        .max()
        .unwrap_or(periods[periods.len() - 1]);
    let lapsed = (today - last_date).num_days() > periodicity.grace_days();

    let current = if lapsed {
        0
    } else {
        let mut tail: u32 = 1;
        for i in (1..periods.len()).rev() {
            if adjacent(periodicity, periods[i - 1], periods[i]) {
                tail += 1;
            } else {
                break;
            }
        }
        tail
    };

    StreakSummary { current, longest }
}

/// Completion rate since habit creation, as a percentage
/// 
/// The numerator counts distinct periods containing at least one completion
/// (calendar dates daily, ISO (year, week) pairs weekly). The denominator
/// counts elapsed periods by day arithmetic: date difference + 1 for daily,
/// elapsed days / 7 + 1 for weekly. The weekly denominator counts days, not
/// ISO weeks, even though the numerator is ISO-week based (see DESIGN.md).
pub fn completion_rate(
    completions: &[NaiveDateTime],
    created_at: NaiveDateTime,
    periodicity: Periodicity,
    now: NaiveDateTime,
) -> f64 {
    if completions.is_empty() {
        return 0.0;
    }

    let total_periods = match periodicity {
        Periodicity::Daily => (now.date() - created_at.date()).num_days().abs() + 1,
        Periodicity::Weekly => (now - created_at).num_days() / 7 + 1,
    };
    if total_periods <= 0 {
        return 0.0;
    }

    let unique_periods = distinct_period_dates(completions, periodicity).len();
    unique_periods as f64 / total_periods as f64 * 100.0
}

/// Number of breaks in the completion history
/// 
/// A break is a consecutive pair of sorted completion dates that is not
/// adjacent under the periodicity's predicate. Fewer than 2 completions
/// yield 0.
pub fn break_count(completions: &[NaiveDateTime], periodicity: Periodicity) -> u32 {
    let mut dates: Vec<NaiveDate> = completions.iter().map(|ts| ts.date()).collect();
    dates.sort_unstable();

    dates
        .windows(2)
        .filter(|pair| !adjacent(periodicity, pair[0], pair[1]))
        .count() as u32
}
