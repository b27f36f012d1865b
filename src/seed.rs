/// Sample-data generation
/// 
/// Seeds a handful of default habits with four weeks of randomized
/// completion history so the analytics have something to chew on from the
/// first run. Daily habits land on roughly 70% of days at a random hour
/// between 07:00 and 22:00; weekly habits on roughly 80% of Sundays
/// between 10:00 and 20:00.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime, Weekday};
use rand::Rng;

use crate::domain::{Habit, Periodicity};
use crate::storage::HabitStorage;
use crate::TrackerError;

/// The default habits created by `seed_default_habits`
pub const DEFAULT_HABITS: [(&str, Periodicity, &str); 5] = [
    ("Walk the cat", Periodicity::Daily, "30 minutes"),
    ("Read Book", Periodicity::Daily, "Read 20 pages"),
    ("Yoga", Periodicity::Weekly, "1.5 h yoga"),
    ("Meditation", Periodicity::Daily, "15 minutes mindfulness"),
    (
        "Feeding stray cats",
        Periodicity::Weekly,
        "Feeding cats in the neighborhood",
    ),
];

const DAILY_COMPLETION_RATE: f64 = 0.7;
const WEEKLY_COMPLETION_RATE: f64 = 0.8;

/// Create the default habits with `days_of_history` days of generated
/// completions, creation dates backdated to the start of the window
/// 
/// Returns the number of habits created.
pub fn seed_default_habits<S: HabitStorage>(
    storage: &S,
    days_of_history: i64,
) -> Result<usize, TrackerError> {
    let end = Local::now().date_naive();
    let start = end - Duration::days(days_of_history);
    let mut rng = rand::rng();

    for (name, periodicity, description) in DEFAULT_HABITS {
        let habit = Habit::with_created_at(
            name.to_string(),
            periodicity,
            Some(description.to_string()),
            start.and_time(NaiveTime::MIN),
        )?;
        storage.create_habit(&habit)?;

        let mut day = start;
        while day <= end {
            if let Some(completed_at) = draw_completion(&mut rng, day, periodicity) {
                storage.add_completion(&habit.id, completed_at)?;
            }
            day = day + Duration::days(1);
        }

        tracing::info!("Seeded habit '{}' ({})", name, periodicity);
    }

    Ok(DEFAULT_HABITS.len())
}

/// Decide whether the habit was completed on `day` and at what time
fn draw_completion<R: Rng>(
    rng: &mut R,
    day: NaiveDate,
    periodicity: Periodicity,
) -> Option<chrono::NaiveDateTime> {
    let (eligible, rate, hours) = match periodicity {
        Periodicity::Daily => (true, DAILY_COMPLETION_RATE, 7..=22u32),
        Periodicity::Weekly => (day.weekday() == Weekday::Sun, WEEKLY_COMPLETION_RATE, 10..=20u32),
    };

    if !eligible || !rng.random_bool(rate) {
        return None;
    }

    let hour = rng.random_range(hours);
    NaiveTime::from_hms_opt(hour, 0, 0).map(|time| day.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_default_habits_have_unique_names() {
        for (i, (name, _, _)) in DEFAULT_HABITS.iter().enumerate() {
            for (other, _, _) in DEFAULT_HABITS.iter().skip(i + 1) {
                assert_ne!(name, other);
            }
        }
    }

    #[test]
    fn test_weekly_draws_only_on_sundays() {
        let mut rng = rand::rng();
        // 2024-01-01 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for _ in 0..50 {
            assert!(draw_completion(&mut rng, monday, Periodicity::Weekly).is_none());
        }
    }

    #[test]
    fn test_daily_draw_hours_are_waking_hours() {
        let mut rng = rand::rng();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for _ in 0..200 {
            if let Some(ts) = draw_completion(&mut rng, day, Periodicity::Daily) {
                let hour = ts.time().hour();
                assert!((7..=22).contains(&hour));
            }
        }
    }
}
