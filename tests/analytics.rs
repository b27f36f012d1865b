/// Integration tests for the analytics engine against the public API
/// 
/// Covers the adjacency predicates, streak/break/rate calculators, the
/// habit analyzer views, and the suggestion rules.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

use habit_tracker::{
    adjacent, analyze_all, analyze_filtered, analyze_habit, analyze_habit_at, break_count,
    habits_by_periodicity, improvement_suggestions, longest_streaks, Habit, Periodicity, Stats,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn ts(y: i32, m: u32, day: u32) -> NaiveDateTime {
    d(y, m, day).and_hms_opt(9, 0, 0).unwrap()
}

fn habit_with(
    name: &str,
    periodicity: Periodicity,
    created: NaiveDateTime,
    completions: &[NaiveDateTime],
) -> Habit {
    let mut habit = Habit::with_created_at(name.to_string(), periodicity, None, created).unwrap();
    for &completion in completions {
        habit.add_completion(completion);
    }
    habit
}

/// A daily habit completed on `len` consecutive days ending today
fn daily_habit_ending_today(name: &str, len: i64) -> Habit {
    let today = Local::now().naive_local();
    let completions: Vec<NaiveDateTime> =
        (0..len).map(|i| today - Duration::days(i)).collect();
    habit_with(
        name,
        Periodicity::Daily,
        today - Duration::days(len - 1),
        &completions,
    )
}

#[test]
fn daily_adjacency_is_symmetric() {
    let pairs = [
        (d(2024, 1, 1), d(2024, 1, 2)),
        (d(2024, 1, 1), d(2024, 1, 5)),
        (d(2023, 12, 31), d(2024, 1, 1)),
    ];
    for (a, b) in pairs {
        assert_eq!(
            adjacent(Periodicity::Daily, a, b),
            adjacent(Periodicity::Daily, b, a),
        );
    }
}

#[test]
fn weekly_same_iso_week_is_adjacent() {
    assert!(adjacent(Periodicity::Weekly, d(2024, 1, 1), d(2024, 1, 5)));
}

#[test]
fn weekly_year_boundary_is_adjacent() {
    assert!(adjacent(Periodicity::Weekly, d(2023, 12, 31), d(2024, 1, 1)));
}

#[test]
fn weekly_two_weeks_apart_is_not_adjacent() {
    assert!(!adjacent(Periodicity::Weekly, d(2024, 1, 1), d(2024, 1, 15)));
}

#[test]
fn break_count_daily_example() {
    let completions = vec![
        ts(2024, 1, 1),
        ts(2024, 1, 2),
        ts(2024, 1, 4),
        ts(2024, 1, 5),
        ts(2024, 1, 7),
    ];
    assert_eq!(break_count(&completions, Periodicity::Daily), 2);
}

#[test]
fn five_consecutive_days_ending_today_is_a_streak_of_five() {
    let habit = daily_habit_ending_today("Running", 5);
    let stats = analyze_habit(&habit);
    assert_eq!(stats.current_streak, 5);
    assert_eq!(stats.longest_streak, 5);
}

#[test]
fn longest_is_at_least_current_and_at_least_one() {
    let cases: Vec<Vec<NaiveDateTime>> = vec![
        vec![ts(2024, 1, 1)],
        vec![ts(2024, 1, 1), ts(2024, 1, 2), ts(2024, 1, 9)],
        vec![ts(2024, 1, 5), ts(2024, 1, 1), ts(2024, 1, 2), ts(2024, 1, 2)],
    ];
    for completions in cases {
        let habit = habit_with("Any", Periodicity::Daily, ts(2024, 1, 1), &completions);
        let stats = analyze_habit_at(&habit, ts(2024, 1, 10));
        assert!(stats.longest_streak >= stats.current_streak);
        assert!(stats.longest_streak >= 1);
    }
}

#[test]
fn completion_rate_zero_without_completions() {
    let habit = habit_with("Yoga", Periodicity::Weekly, ts(2023, 1, 1), &[]);
    let stats = analyze_habit_at(&habit, ts(2024, 1, 1));
    assert_eq!(stats.completion_rate, 0.0);
}

#[test]
fn completion_rate_full_for_creation_day_completion() {
    let created = ts(2024, 3, 1);
    let habit = habit_with("Journal", Periodicity::Daily, created, &[created]);
    let stats = analyze_habit_at(&habit, created);
    assert_eq!(stats.completion_rate, 100.0);
}

#[test]
fn lapsed_daily_habit_has_no_current_streak() {
    let habit = habit_with(
        "Stretching",
        Periodicity::Daily,
        ts(2024, 3, 1),
        &[ts(2024, 3, 1), ts(2024, 3, 2), ts(2024, 3, 3)],
    );
    let stats = analyze_habit_at(&habit, ts(2024, 3, 10));
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.longest_streak, 3);
}

#[test]
fn weekly_streak_collapses_same_week_and_crosses_year_boundary() {
    let habit = habit_with(
        "Yoga",
        Periodicity::Weekly,
        ts(2023, 12, 18),
        &[
            ts(2023, 12, 20), // ISO week 51
            ts(2023, 12, 27), // ISO week 52
            ts(2023, 12, 29), // still week 52
            ts(2024, 1, 3),   // ISO week 1 of 2024
        ],
    );
    let stats = analyze_habit_at(&habit, ts(2024, 1, 4));
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.longest_streak, 3);
    assert_eq!(stats.total_completions, 4);
}

#[test]
fn analyze_is_idempotent_for_a_fixed_instant() {
    let habit = habit_with(
        "Reading",
        Periodicity::Daily,
        ts(2024, 1, 1),
        &[ts(2024, 1, 1), ts(2024, 1, 3), ts(2024, 1, 4)],
    );
    let now = ts(2024, 1, 5);
    let first = analyze_habit_at(&habit, now);
    let second = analyze_habit_at(&habit, now);
    assert_eq!(first, second);
}

#[test]
fn analyze_all_keys_by_name() {
    let habits = vec![
        daily_habit_ending_today("Daily Habit", 5),
        habit_with("Weekly Habit", Periodicity::Weekly, ts(2024, 1, 1), &[ts(2024, 1, 1)]),
    ];
    let all = analyze_all(&habits);
    assert_eq!(all.len(), 2);
    assert_eq!(all["Daily Habit"].current_streak, 5);
    assert_eq!(all["Weekly Habit"].periodicity, Periodicity::Weekly);
}

#[test]
fn filtered_analysis_preserves_order_and_predicate() {
    let habits = vec![
        daily_habit_ending_today("A", 2),
        habit_with("B", Periodicity::Weekly, ts(2024, 1, 1), &[]),
        daily_habit_ending_today("C", 3),
    ];

    let daily = habits_by_periodicity(&habits, Periodicity::Daily);
    let names: Vec<&str> = daily.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);

    let busy = analyze_filtered(&habits, |h| h.completions().len() > 2);
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].name, "C");
}

#[test]
fn longest_streak_projection() {
    let habits = vec![
        daily_habit_ending_today("Daily Habit", 5),
        habit_with(
            "Weekly Habit",
            Periodicity::Weekly,
            ts(2024, 1, 1),
            &[ts(2024, 1, 1), ts(2024, 1, 8), ts(2024, 1, 15)],
        ),
    ];
    let streaks = longest_streaks(&habits);
    assert_eq!(streaks["Daily Habit"], 5);
    assert_eq!(streaks["Weekly Habit"], 3);
}

#[test]
fn all_four_suggestions_fire_together() {
    let stats = Stats {
        total_completions: 10,
        current_streak: 1,
        longest_streak: 5,
        completion_rate: 25.0,
        break_count: 5,
        last_completed: None,
        periodicity: Periodicity::Daily,
    };
    let suggestions = improvement_suggestions(&stats);
    assert_eq!(suggestions.len(), 4);
    assert!(suggestions[0].contains("easier"));
    assert!(suggestions[1].contains("specific times"));
    assert!(suggestions[2].contains("longer streak (5 days)"));
    assert!(suggestions[3].contains("reminders"));
}
