/// Command line front end for the habit tracker core
///
/// This file sets up logging, parses command line arguments, opens the
/// preference database and runs one command against it.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use habit_tracker_core::usecases::{
    self, progress_summary, AddHabitParams, ProgressSummary,
};
use habit_tracker_core::storage::HABITS_KEY;
use habit_tracker_core::{
    parse_date, FocusReminderStore, Habit, HabitId, HabitTracker, PreferenceStore, SqlitePreferences,
    StorageError, TrackerError,
};

/// Directory created under each candidate base directory
const APP_DIR: &str = "habit_tracker";

const DATABASE_FILE: &str = "preferences.db";

/// Pick where the preference database lives when `--database` is absent
///
/// The first candidate that can be created and written to wins; the system
/// temp directory is the last resort.
fn default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let candidates = [
        dirs::data_dir().map(|dir| dir.join(APP_DIR)),
        dirs::home_dir().map(|dir| dir.join(format!(".{}", APP_DIR))),
        dirs::config_dir().map(|dir| dir.join(APP_DIR)),
    ];

    if let Some(dir) = candidates.into_iter().flatten().find(|dir| is_writable_dir(dir)) {
        return Ok(dir.join(DATABASE_FILE));
    }

    let fallback = std::env::temp_dir().join(APP_DIR);
    std::fs::create_dir_all(&fallback)?;
    tracing::warn!("No writable data directory, storing habits under {}", fallback.display());
    Ok(fallback.join(DATABASE_FILE))
}

/// Create `dir` if needed and check that a file can be written in it
fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let marker = dir.join(".write_check");
    let writable = std::fs::write(&marker, b"").is_ok();
    let _ = std::fs::remove_file(&marker);
    writable
}

/// Command line arguments for the habit tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite preference database
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Optional reference date shared by several commands
#[derive(ClapArgs, Debug)]
struct DateArg {
    /// Date as YYYY-MM-DD, defaults to today
    #[arg(long)]
    date: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List habits with their progress
    List(DateArg),
    /// Create a habit
    Add {
        name: String,
        /// Size of the rolling window in days
        #[arg(long)]
        window_days: Option<i32>,
    },
    /// Rename a habit
    Rename { id: HabitId, name: String },
    /// Mark a day done, or undo it
    Toggle {
        id: HabitId,
        #[command(flatten)]
        date: DateArg,
    },
    /// Fill a habit's window to the given fraction (0.0 - 1.0)
    SetProgress {
        id: HabitId,
        fraction: f32,
        #[command(flatten)]
        date: DateArg,
    },
    /// Overall progress, pending check and the last seven days
    Summary(DateArg),
    /// Show or change the focus reminder switch
    Reminder {
        #[arg(long, conflicts_with = "disable")]
        enable: bool,
        #[arg(long)]
        disable: bool,
    },
    /// Print the raw stored habit blob
    Export,
}

impl DateArg {
    fn resolve(&self) -> Result<chrono::NaiveDate, TrackerError> {
        match &self.date {
            Some(date) => Ok(parse_date(date)?),
            None => Ok(usecases::today()),
        }
    }
}

/// Fail with `HabitNotFound` unless `habit_id` is stored
async fn require_habit(
    tracker: &HabitTracker<SqlitePreferences>,
    habit_id: HabitId,
) -> Result<Habit, TrackerError> {
    usecases::current_habits(tracker.habits())
        .await?
        .into_iter()
        .find(|habit| habit.id == habit_id)
        .ok_or(TrackerError::HabitNotFound { habit_id })
}

fn print_summary(summary: &ProgressSummary, habits: &[Habit]) {
    println!(
        "Progress on {}: {:.0}% overall{}",
        summary.reference_date,
        summary.overall_progress * 100.0,
        if summary.has_pending_habits { ", habits pending" } else { "" }
    );
    for (habit, progress) in habits.iter().zip(&summary.habits) {
        println!(
            "  #{} {} - {:.0}% ({})",
            habit.id,
            habit.name,
            progress.progress_fraction * 100.0,
            progress.status.display_name()
        );
    }
}

async fn run(tracker: HabitTracker<SqlitePreferences>, command: Command, json: bool) -> Result<(), TrackerError> {
    match command {
        Command::List(date) => {
            let date = date.resolve()?;
            let habits = usecases::current_habits(tracker.habits()).await?;
            let summary = progress_summary(&habits, date);
            if json {
                println!("{}", serde_json::to_string_pretty(&habits)?);
            } else if habits.is_empty() {
                println!("No habits yet. Create one with `add <name>`.");
            } else {
                print_summary(&summary, &habits);
            }
        }
        Command::Add { name, window_days } => {
            let response = usecases::add_habit(tracker.habits(), AddHabitParams { name, window_days }).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.message);
            }
        }
        Command::Rename { id, name } => {
            usecases::rename_habit(tracker.habits(), id, name).await?;
            println!("Renamed habit #{}", id);
        }
        Command::Toggle { id, date } => {
            let date = date.resolve()?;
            require_habit(&tracker, id).await?;
            usecases::toggle_habit_completion(tracker.habits(), id, Some(date)).await?;
            let habit = require_habit(&tracker, id).await?;
            let state = if habit.is_completed_on(date) { "done" } else { "not done" };
            println!("Habit #{} marked {} on {}", id, state, date);
        }
        Command::SetProgress { id, fraction, date } => {
            let date = date.resolve()?;
            require_habit(&tracker, id).await?;
            usecases::set_habit_progress(tracker.habits(), id, fraction, Some(date)).await?;
            let progress = require_habit(&tracker, id).await?.progress_on(date);
            if json {
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else {
                println!(
                    "Habit #{} is now at {:.0}% ({})",
                    id,
                    progress.progress_fraction * 100.0,
                    progress.status.display_name()
                );
            }
        }
        Command::Summary(date) => {
            let date = date.resolve()?;
            let habits = usecases::current_habits(tracker.habits()).await?;
            let summary = progress_summary(&habits, date);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary, &habits);
                for day in &summary.weekly {
                    println!("  {} {:>4.0}%", day.date.format("%a %d"), day.average_fraction * 100.0);
                }
            }
        }
        Command::Reminder { enable, disable } => {
            if enable || disable {
                tracker.focus_reminder().set_focus_reminder_enabled(enable).await?;
            }
            let enabled = tracker.focus_reminder().is_focus_reminder_enabled().await?;
            if json {
                println!("{}", serde_json::json!({ "focus_reminder_enabled": enabled }));
            } else {
                println!("Focus reminder is {}", if enabled { "on" } else { "off" });
            }
        }
        Command::Export => {
            let store = std::sync::Arc::clone(tracker.store());
            let blob = tokio::task::spawn_blocking(move || store.get_string(HABITS_KEY))
                .await
                .map_err(StorageError::from)??;
            println!("{}", blob.unwrap_or_default());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
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
        .with_env_filter(format!("habit_tracker_core={},habit_tracker={}", log_level, log_level))
        .with_writer(std::io::stderr) // Keep stdout for command output
        .init();

    // Determine database path
    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            path
        }
        None => default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let tracker = HabitTracker::new(db_path).await?;
    run(tracker, args.command, args.json).await?;

    Ok(())
}
