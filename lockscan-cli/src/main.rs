mod display;
mod poll;
mod settings;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::display::{display_cursors, display_scores, display_status};
use crate::poll::{DirectoryFeed, Poller, StdoutSink, feed_today};
use crate::settings::{DEFAULT_SETTINGS_PATH, Settings, load_settings, save_settings};
use lockscan_core::analysis::selector::select;
use lockscan_core::analysis::{Outcome, analyze_draws, analyze_text, score_table};
use lockscan_core::feed::DailyFeed;
use lockscan_core::markup::Markup;
use lockscan_core::parser::parse_results;
use lockscan_core::report::render;
use lockscan_db::db::{db_path, fetch_recent_cursors, load_cursor, migrate, open_db};
use lockscan_db::models::LockSize;

#[derive(Parser)]
#[command(name = "lockscan", about = "Lock-based 3-digit set analysis of daily lottery results")]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// Override the configured lock size for this run
    #[arg(short, long, global = true)]
    lock_size: Option<LockSize>,

    /// Override the configured report markup for this run
    #[arg(short, long, global = true)]
    markup: Option<Markup>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze results written as "123 - 45" (arguments, file, or stdin)
    Analyze {
        /// Result text; read from --file or stdin when omitted
        text: Vec<String>,

        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Analyze a daily feed file (JSON)
    Feed {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the ranked full-coverage sets
    Scores {
        text: Vec<String>,

        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Number of rows to show
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Watch the feed directory and report every new complete lock
    Poll {
        /// Directory of <YYYY-MM-DD>.json feeds
        #[arg(long)]
        feed_dir: Option<PathBuf>,

        /// Seconds between two checks
        #[arg(long)]
        interval: Option<u64>,

        /// Run a single check and exit
        #[arg(long)]
        once: bool,
    },

    /// Today's processing status
    Status {
        /// Number of past days to list
        #[arg(long, default_value = "7")]
        days: u32,
    },

    /// Change the lock size (persisted in the settings file)
    SetLocks {
        #[arg(allow_negative_numbers = true)]
        size: String,
    },

    /// Print the database path
    DbPath,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.settings)?;
    if let Some(size) = cli.lock_size {
        settings.lock_size = size;
    }
    if let Some(markup) = cli.markup {
        settings.markup = markup;
    }

    match cli.command {
        Command::Analyze { text, file } => cmd_analyze(&settings, text, file.as_deref()),
        Command::Feed { file } => cmd_feed(&settings, &file),
        Command::Scores { text, file, top } => cmd_scores(&settings, text, file.as_deref(), top),
        Command::Poll { feed_dir, interval, once } => cmd_poll(settings, feed_dir, interval, once),
        Command::Status { days } => cmd_status(&settings, days),
        Command::SetLocks { size } => cmd_set_locks(&cli.settings, &size),
        Command::DbPath => {
            println!("{}", db_path().display());
            Ok(())
        }
    }
}

fn read_input(text: Vec<String>, file: Option<&Path>) -> Result<String> {
    if !text.is_empty() {
        return Ok(text.join(" "));
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {:?}", path));
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Cannot read stdin")?;
    Ok(input)
}

fn print_outcome(outcome: Outcome, markup: Markup) {
    match outcome {
        Outcome::NoInput => println!("No results found in the form 123 - 45"),
        Outcome::NothingActionable => println!("Results found, but no formula produced anything"),
        Outcome::Analyzed(analysis) => match render(&analysis, markup) {
            Some(report) => println!("{report}"),
            None => println!("Results found, but no formula produced anything"),
        },
    }
}

fn cmd_analyze(settings: &Settings, text: Vec<String>, file: Option<&Path>) -> Result<()> {
    let input = read_input(text, file)?;
    print_outcome(analyze_text(&input, settings.lock_size), settings.markup);
    Ok(())
}

fn cmd_feed(settings: &Settings, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Cannot read feed {:?}", file))?;
    let feed = DailyFeed::from_json(&json)?;
    let Some((key, draws)) = feed.results() else {
        println!("No matching source key in {:?}", file);
        return Ok(());
    };
    println!("Source {}: {} rounds, lock size {}\n", key, draws.len(), settings.lock_size);
    print_outcome(analyze_draws(&draws, settings.lock_size), settings.markup);
    Ok(())
}

fn cmd_scores(
    settings: &Settings,
    text: Vec<String>,
    file: Option<&Path>,
    top: usize,
) -> Result<()> {
    let input = read_input(text, file)?;
    let Some(parsed) = parse_results(&input) else {
        println!("No results found in the form 123 - 45");
        return Ok(());
    };
    let Some(table) = score_table(&parsed.top3s(), settings.lock_size) else {
        println!("Found {} sets but all of them are doubles, nothing to analyze", parsed.len());
        return Ok(());
    };
    let selection = select(&table.ranked);
    display_scores(&table.ranked, selection.as_ref(), table.total_locks, top);
    Ok(())
}

fn cmd_poll(
    settings: Settings,
    feed_dir: Option<PathBuf>,
    interval: Option<u64>,
    once: bool,
) -> Result<()> {
    let conn = open_db(&db_path())?;
    migrate(&conn)?;

    let dir = feed_dir.unwrap_or(settings.feed_dir);
    let interval = Duration::from_secs(interval.unwrap_or(settings.interval_secs));
    log::info!(
        "Polling {:?} every {}s (report on full lock only), lock size {}",
        dir,
        interval.as_secs(),
        settings.lock_size
    );

    let mut poller = Poller {
        conn: &conn,
        source: DirectoryFeed { dir },
        sink: StdoutSink,
        lock_size: settings.lock_size,
        markup: settings.markup,
    };
    poller.run(interval, once)
}

fn cmd_status(settings: &Settings, days: u32) -> Result<()> {
    let conn = open_db(&db_path())?;
    migrate(&conn)?;

    let cursor = load_cursor(&conn, feed_today())?;
    display_status(&cursor, settings.lock_size);

    println!();
    let cursors = fetch_recent_cursors(&conn, days)?;
    display_cursors(&cursors, settings.lock_size);
    Ok(())
}

fn cmd_set_locks(path: &Path, size: &str) -> Result<()> {
    let size: LockSize = size.parse().context("Usage: lockscan set-locks 4")?;
    // re-read without per-run overrides so they are not persisted
    let mut settings = load_settings(path)?;
    settings.lock_size = size;
    save_settings(&settings, path)?;
    println!("✅ Lock size set to {} rounds", size);
    Ok(())
}
