/// Period-adjacency predicates for the analytics engine
/// 
/// Two completion dates belong to "consecutive" reporting periods when they
/// sit in adjacent calendar days (daily habits) or adjacent ISO weeks
/// (weekly habits). Weekly adjacency must use the ISO week-numbering
/// calendar - weeks run Monday to Sunday and week 1 is the week containing
/// the year's first Thursday - because raw day-count heuristics misclassify
/// pairs near year boundaries and pairs that share a week by coincidence.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::domain::Periodicity;

/// Whether two dates fall in the same or directly consecutive reporting
/// periods for the given periodicity
/// 
/// Daily: the calendar dates differ by exactly one day.
/// Weekly: same ISO (year, week); or consecutive weeks of the same ISO
/// year; or a year-boundary pair where one date sits in the last ISO week
/// of its year (52 or 53) and the other in week 1 of the following year.
/// The predicate is symmetric in its two date arguments.
pub fn adjacent(periodicity: Periodicity, a: NaiveDate, b: NaiveDate) -> bool {
    match periodicity {
        Periodicity::Daily => (a - b).num_days().abs() == 1,
        Periodicity::Weekly => weeks_adjacent(a, b),
    }
}

/// Whether two dates fall in the same reporting period
pub fn same_period(periodicity: Periodicity, a: NaiveDate, b: NaiveDate) -> bool {
    match periodicity {
        Periodicity::Daily => a == b,
        Periodicity::Weekly => a.iso_week() == b.iso_week(),
    }
}

/// Number of the last ISO week of a year (52 or 53)
/// 
/// December 28 always falls in the final ISO week of its year.
pub fn last_iso_week(year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, 12, 28)
        .map(|d| d.iso_week().week())
        .unwrap_or(52)
}

fn weeks_adjacent(a: NaiveDate, b: NaiveDate) -> bool {
    let (year_a, week_a) = (a.iso_week().year(), a.iso_week().week());
    let (year_b, week_b) = (b.iso_week().year(), b.iso_week().week());

    if year_a == year_b {
        // Same ISO week counts as adjacent rather than a break
        return week_a.abs_diff(week_b) <= 1;
    }

    let (early, late) = if (year_a, week_a) < (year_b, week_b) {
        ((year_a, week_a), (year_b, week_b))
    } else {
        ((year_b, week_b), (year_a, week_a))
    };

    late.0 == early.0 + 1 && late.1 == 1 && early.1 == last_iso_week(early.0)
}

/// Collapse completion timestamps to one representative date per distinct
/// reporting period, sorted ascending
/// 
/// Streaks are counted in periods, not raw completions: several completions
/// on the same day (or in the same ISO week) count once and never break a
/// run. The representative kept is the earliest date of each period, which
/// maps to the same period as every other date it replaced.
pub(crate) fn distinct_period_dates(
    completions: &[NaiveDateTime],
    periodicity: Periodicity,
) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = completions.iter().map(|ts| ts.date()).collect();
    dates.sort_unstable();
    dates.dedup_by(|a, b| same_period(periodicity, *a, *b));
    dates
}
