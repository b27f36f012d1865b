/// Main entry point for the habit tracker CLI
/// 
/// Sets up logging, parses command line arguments, and dispatches to the
/// tracker. User-facing output goes to stdout, logs to stderr.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use tracing::info;

use habit_tracker::{HabitTracker, Periodicity};

/// Get the default database path with a fallback strategy
/// 
/// Prefers a dot-directory in the user's home, then the platform data
/// directory, then a temporary directory as a last resort.
fn default_database_path() -> Result<PathBuf, std::io::Error> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(".habit_tracker")),
        dirs::data_dir().map(|p| p.join("habit_tracker")),
    ];

    for dir in candidates.into_iter().flatten() {
        if std::fs::create_dir_all(&dir).is_ok() {
            return Ok(dir.join("habits.db"));
        }
    }

    let dir = std::env::temp_dir().join("habit_tracker");
    std::fs::create_dir_all(&dir)?;
    tracing::warn!("Using temporary directory for database: {}", dir.display());
    Ok(dir.join("habits.db"))
}

/// Command line arguments for the habit tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new habit
    Create {
        /// Name of the habit
        name: String,
        /// Habit periodicity (daily or weekly)
        periodicity: Periodicity,
        /// Habit description
        #[arg(long)]
        description: Option<String>,
    },
    /// Record a completion for a habit
    Complete {
        /// Name of the habit
        name: String,
        /// Completion timestamp (e.g. 2024-03-01T08:30:00); defaults to now
        #[arg(long)]
        at: Option<NaiveDateTime>,
    },
    /// List habits with their streaks
    List {
        /// Only show habits with this periodicity
        #[arg(long)]
        periodicity: Option<Periodicity>,
    },
    /// Show a habit's details and completion history
    View {
        /// Name of the habit
        name: String,
    },
    /// Show statistics for one habit or for all habits
    Stats {
        /// Name of the habit; omit for all habits
        name: Option<String>,
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the longest streak for every habit
    Streaks,
    /// Show improvement suggestions for a habit
    Suggest {
        /// Name of the habit
        name: String,
    },
    /// Create the default habits with four weeks of sample history
    Seed {
        /// Days of history to generate
        #[arg(long, default_value_t = 28)]
        days: i64,
    },
}

fn print_stats(name: &str, stats: &habit_tracker::Stats) {
    println!("{} ({})", name, stats.periodicity);
    println!("  Total completions: {}", stats.total_completions);
    println!("  Current streak:    {} {}", stats.current_streak, stats.periodicity.unit_name());
    println!("  Longest streak:    {} {}", stats.longest_streak, stats.periodicity.unit_name());
    println!("  Completion rate:   {:.1}%", stats.completion_rate);
    println!("  Breaks:            {}", stats.break_count);
    match stats.last_completed {
        Some(ts) => println!("  Last completed:    {}", ts),
        None => println!("  Last completed:    never"),
    }
}

fn run(tracker: &HabitTracker, command: Command) -> Result<(), habit_tracker::TrackerError> {
    match command {
        Command::Create {
            name,
            periodicity,
            description,
        } => {
            let habit = tracker.create_habit(name, periodicity, description)?;
            println!("Created habit: {} (ID: {})", habit.name, habit.id);
        }
        Command::Complete { name, at } => {
            tracker.complete_habit(&name, at)?;
            println!("Recorded completion for '{}'", name);
        }
        Command::List { periodicity } => {
            let habits = tracker.habits(periodicity)?;
            if habits.is_empty() {
                println!("No habits yet. Create one with 'habit-tracker create'.");
            }
            for habit in &habits {
                let stats = habit_tracker::analyze_habit(habit);
                println!("Name: {}", habit.name);
                println!("Periodicity: {}", habit.periodicity);
                println!("Current streak: {}", stats.current_streak);
                println!("Longest streak: {}", stats.longest_streak);
                println!("{}", "-".repeat(30));
            }
        }
        Command::View { name } => {
            let habit = tracker.habit(&name)?;
            println!("Name: {}", habit.name);
            println!("Periodicity: {}", habit.periodicity);
            println!(
                "Description: {}",
                habit.description.as_deref().unwrap_or("(none)")
            );
            println!("Created at: {}", habit.created_at);
            println!();
            println!("Completions:");
            let mut completions = habit.completions().to_vec();
            completions.sort();
            for completion in completions {
                println!("  {}", completion);
            }
        }
        Command::Stats { name, json } => match name {
            Some(name) => {
                let stats = tracker.stats_for(&name)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    print_stats(&name, &stats);
                }
            }
            None => {
                let all = tracker.stats_all()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&all)?);
                } else {
                    let mut names: Vec<_> = all.keys().collect();
                    names.sort();
                    for name in names {
                        print_stats(name, &all[name]);
                        println!();
                    }
                }
            }
        },
        Command::Streaks => {
            let streaks = tracker.longest_streaks()?;
            let mut names: Vec<_> = streaks.keys().collect();
            names.sort();
            for name in names {
                println!("{}: {}", name, streaks[name]);
            }
        }
        Command::Suggest { name } => {
            let suggestions = tracker.suggestions_for(&name)?;
            if suggestions.is_empty() {
                println!("'{}' is going strong - no suggestions.", name);
            }
            for suggestion in suggestions {
                println!("- {}", suggestion);
            }
        }
        Command::Seed { days } => {
            let count = tracker.seed(days)?;
            println!("Seeded {} default habits with {} days of history", count, days);
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_tracker={}", log_level))
        .with_writer(std::io::stderr) // Logs to stderr, output to stdout
        .init();

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let tracker = HabitTracker::new(db_path)?;
    run(&tracker, args.command)?;

    Ok(())
}
