//! AIQO daily companion
//!
//! Boots a session for today against the configured store and runs one
//! command: show the dashboard, log an entry, run a timer or export history.

use std::path::PathBuf;

use aiqo_backend::config::AppConfig;
use aiqo_backend::services::{DailySession, ExportService, JournalService};
use aiqo_backend::state::AppState;
use aiqo_backend::storage;
use aiqo_backend::timers::TimerDriver;
use aiqo_shared::{format_countdown, format_duration, Countdown, JournalEntry, Profile, TimerKind};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aiqo", about = "AIQO daily health companion", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Act on this date instead of today (YYYY-MM-DD)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Command {
    /// Show today's scores, progress and nudge
    Dashboard,
    /// List today's dishes
    Meals,
    /// Save the onboarding profile from a JSON file
    Onboard { file: PathBuf },
    /// Log water in ml
    Water { ml: i32 },
    /// Log steps
    Steps { count: u32 },
    /// Mark a dish as eaten
    Eat { meal_id: String },
    /// Mark the daily prayer done
    Prayer {
        #[arg(long)]
        undo: bool,
    },
    /// Mark the workout done
    Workout {
        #[arg(long)]
        undo: bool,
    },
    /// Log sleep quality (0-100) and hours spent sitting
    Sleep { pct: f64, sitting_hrs: f64 },
    /// Draw a new set of dishes
    Regenerate,
    /// Check completion and update the streak
    Complete,
    /// Write the journal entry for the day
    Journal { mood: u8, note: String },
    /// Export stored days as CSV
    Export { start: NaiveDate, end: NaiveDate },
    /// Run a countdown until it expires or Ctrl+C
    Timer {
        #[arg(value_enum)]
        kind: TimerArg,
        /// Dish whose preparation time sets the cook timer
        #[arg(long)]
        meal: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TimerArg {
    Rest,
    Cook,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        backend = ?config.storage.backend,
        "Starting AIQO"
    );

    let store = storage::open_store(&config.storage).await?;
    let state = AppState::new(store, config);
    let today = cli
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    run(&state, today, cli.command.unwrap_or(Command::Dashboard)).await
}

async fn run(state: &AppState, today: NaiveDate, command: Command) -> Result<()> {
    // Commands that do not touch the day record
    match command {
        Command::Export { start, end } => {
            let csv = ExportService::days_csv(state.store(), start, end).await?;
            print!("{}", csv);
            return Ok(());
        }
        Command::Journal { mood, note } => {
            let entry = JournalEntry { mood, note };
            JournalService::save(state.store(), today, &entry).await?;
            print_json(&entry)?;
            return Ok(());
        }
        _ => {}
    }

    let mut session = DailySession::open(state, today).await?;

    match command {
        Command::Dashboard => {}
        Command::Meals => {
            for meal in session.day().meals.iter().chain(session.day().snacks.iter()) {
                let eaten = if session.day().is_meal_eaten(&meal.id) { "x" } else { " " };
                println!(
                    "[{}] {}  {} kcal  {}  {}",
                    eaten,
                    meal.id,
                    meal.kcal,
                    format_duration(meal.prep_minutes),
                    meal.title
                );
            }
            return Ok(());
        }
        Command::Onboard { file } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading profile {}", file.display()))?;
            let profile: Profile = serde_json::from_str(&raw)
                .with_context(|| format!("parsing profile {}", file.display()))?;
            session.update_profile(profile).await?;
        }
        Command::Water { ml } => {
            session.add_water(ml).await?;
        }
        Command::Steps { count } => {
            session.add_steps(count).await?;
        }
        Command::Eat { meal_id } => {
            session.eat_meal(&meal_id).await?;
        }
        Command::Prayer { undo } => {
            session.set_prayer(!undo).await?;
        }
        Command::Workout { undo } => {
            session.set_workout(!undo).await?;
        }
        Command::Sleep { pct, sitting_hrs } => {
            session.log_sleep(pct, sitting_hrs).await?;
        }
        Command::Regenerate => {
            session.regenerate_meals().await?;
        }
        Command::Complete => {
            let streak = session.complete_day().await?;
            info!(streak, "Streak evaluated");
        }
        Command::Timer { kind, meal } => {
            let timers = TimerDriver::new(&state.config().timers);
            let rx = match (kind, meal) {
                (TimerArg::Rest, _) => timers.start_rest().await,
                (TimerArg::Cook, Some(id)) => timers.start_cook(session.meal(&id)?).await,
                (TimerArg::Cook, None) => anyhow::bail!("--meal is required for the cook timer"),
            };
            let kind = match kind {
                TimerArg::Rest => TimerKind::Rest,
                TimerArg::Cook => TimerKind::Cook,
            };
            run_timer(&timers, kind, rx).await;
            return Ok(());
        }
        Command::Export { .. } | Command::Journal { .. } => {
            anyhow::bail!("command does not act on the day record")
        }
    }

    print_json(&session.dashboard())
}

/// Print the countdown each second until it expires or the user interrupts
async fn run_timer(
    timers: &TimerDriver,
    kind: TimerKind,
    mut rx: tokio::sync::watch::Receiver<Countdown>,
) {
    tokio::select! {
        finished = follow_countdown(&mut rx) => match finished {
            Countdown::Expired => info!(?kind, "Timer expired"),
            _ => info!(?kind, "Timer cancelled"),
        },
        _ = shutdown_signal() => {
            timers.cancel(kind).await;
        }
    }
}

/// Print each state until the countdown stops running; returns the last state
async fn follow_countdown(rx: &mut tokio::sync::watch::Receiver<Countdown>) -> Countdown {
    loop {
        let state = *rx.borrow_and_update();
        match state {
            Countdown::Running { remaining_secs } => println!("{}", format_countdown(remaining_secs)),
            Countdown::Expired => {
                println!("{}", format_countdown(0));
                return state;
            }
            Countdown::Idle => return state,
        }
        if rx.changed().await.is_err() {
            return *rx.borrow();
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize tracing/logging
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "aiqo_backend=info,aiqo=info".into()
        } else {
            "aiqo_backend=debug,aiqo=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, cancelling timer");
        }
        _ = terminate => {
            info!("Received SIGTERM, cancelling timer");
        }
    }
}
