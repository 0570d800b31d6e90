use std::fmt;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use chrono::{TimeZone, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

use todolimit::commands::{cmd_list, cmd_payload, cmd_remaining, cmd_to_local, cmd_to_stored};
use todolimit::config::{Config, Zone};
use todolimit::deadline::DeadlineFormatter;
use todolimit::form::TaskForm;
use todolimit::models::DoneFilter;
use todolimit::snapshot::load_snapshot;
use todolimit::tui::run_tui;

#[derive(Parser)]
#[command(name = "todolimit")]
#[command(about = "Task deadline countdowns and timezone conversion", long_about = None)]
struct Cli {
    /// Timezone for local edit values (IANA id, e.g. Asia/Tokyo)
    #[arg(long, global = true)]
    tz: Option<String>,
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the time left until a deadline
    Remaining {
        /// Stored instant (2024-06-01T15:30:00.000Z) or local value (2024-06-01T15:30)
        deadline: String,
        /// Count down from this instant instead of the current time
        #[arg(long)]
        now: Option<String>,
    },
    /// Convert a stored UTC instant to a local edit value
    ToLocal {
        instant: String,
    },
    /// Convert a local edit value (YYYY-MM-DDTHH:mm) to a stored UTC instant
    ToStored {
        local: String,
    },
    /// List tasks from a snapshot file, soonest deadline first
    List {
        /// JSON file with the tasks (`-` for stdin)
        file: PathBuf,
        /// Show completed tasks instead of open ones
        #[arg(short, long)]
        done: bool,
    },
    /// Print the request body for creating or updating a task
    Payload {
        #[arg(short, long)]
        title: String,
        #[arg(short = 'D', long, default_value = "")]
        detail: String,
        /// Mark the task as completed
        #[arg(long)]
        done: bool,
        /// Deadline as a local edit value (YYYY-MM-DDTHH:mm)
        #[arg(short, long, default_value = "")]
        limit: String,
    },
    /// Watch countdowns for a snapshot file in an interactive view
    Watch {
        file: PathBuf,
        /// Refresh interval in seconds
        #[arg(long)]
        tick_secs: Option<u64>,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    match config.resolve_zone(cli.tz.as_deref())? {
        Zone::Local => dispatch(cli.command, DeadlineFormatter::local(), &config),
        Zone::Named(tz) => dispatch(cli.command, DeadlineFormatter::new(tz), &config),
    }
}

fn dispatch<Tz: TimeZone>(command: Commands, formatter: DeadlineFormatter<Tz>, config: &Config) -> anyhow::Result<()>
where
    Tz::Offset: fmt::Display,
{
    match command {
        Commands::Remaining { deadline, now } => {
            let now = match now {
                Some(raw) => formatter
                    .parse_deadline(Some(&raw))?
                    .ok_or_else(|| anyhow!("--now must not be empty"))?,
                None => Utc::now(),
            };
            println!("{}", cmd_remaining(&formatter, &deadline, now)?);
        }
        Commands::ToLocal { instant } => println!("{}", cmd_to_local(&formatter, &instant)?),
        Commands::ToStored { local } => println!("{}", cmd_to_stored(&formatter, &local)?),
        Commands::List { file, done } => {
            let tasks = load_snapshot(&file)?;
            let filter = if done { DoneFilter::Done } else { DoneFilter::Todo };
            println!("{}", cmd_list(&formatter, &tasks, filter, Utc::now()));
        }
        Commands::Payload { title, detail, done, limit } => {
            let form = TaskForm { title, detail, done, limit };
            println!("{}", cmd_payload(&formatter, &form)?);
        }
        Commands::Watch { file, tick_secs } => {
            let secs = tick_secs.unwrap_or_else(|| config.tick_secs()).max(1);
            run_tui(file, formatter, Duration::from_secs(secs))?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "todolimit", &mut io::stdout());
        }
    }
    Ok(())
}
