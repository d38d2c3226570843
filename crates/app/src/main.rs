mod audio;
mod input;
mod view;

use std::fmt;
use std::sync::Arc;

use quiz_core::model::{LoadStatus, PreferencesDraft, SessionConfig};
use services::{AppServices, Clock, PreferencesService, QuizHandle, QuizSnapshot, provider_for};
use storage::repository::Storage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::audio::TerminalBell;
use crate::input::{HELP, Input};
use crate::view::{Palette, render_state, render_summary};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingSource,
    InvalidDbUrl { raw: String },
    InvalidToggle { flag: &'static str, raw: String },
    InvalidTimeLimit { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingSource => {
                write!(f, "no quiz source: pass --source or set QUIZ_SOURCE")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidToggle { flag, raw } => {
                write!(f, "invalid {flag} value: {raw} (expected on or off)")
            }
            ArgsError::InvalidTimeLimit { raw } => write!(f, "invalid --time-limit value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app play  [--source <url|path>] [--db <sqlite_url>] [--time-limit <secs>]");
    eprintln!("  app prefs [--db <sqlite_url>] [--sound on|off] [--dark-mode on|off]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://quiz.sqlite3");
    eprintln!("  --time-limit {}", SessionConfig::DEFAULT_TIME_LIMIT_SECS);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SOURCE, QUIZ_DB_URL, QUIZ_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Prefs,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "prefs" => Some(Self::Prefs),
            _ => None,
        }
    }
}

struct PlayArgs {
    db_url: String,
    source: String,
    time_limit_secs: u32,
}

struct PrefsArgs {
    db_url: String,
    draft: PreferencesDraft,
}

fn default_db_url() -> String {
    std::env::var("QUIZ_DB_URL")
        .ok()
        .map_or_else(|| "sqlite://quiz.sqlite3".into(), normalize_sqlite_url)
}

fn parse_db_flag(args: &mut impl Iterator<Item = String>) -> Result<String, ArgsError> {
    let value = require_value(args, "--db")?;
    if value.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: value });
    }
    Ok(normalize_sqlite_url(value))
}

fn parse_toggle(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<bool, ArgsError> {
    let value = require_value(args, flag)?;
    match value.as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(ArgsError::InvalidToggle { flag, raw: value }),
    }
}

impl PlayArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = default_db_url();
        let mut source = std::env::var("QUIZ_SOURCE").ok();
        let mut time_limit_secs = SessionConfig::DEFAULT_TIME_LIMIT_SECS;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db_url = parse_db_flag(args)?,
                "--source" => source = Some(require_value(args, "--source")?),
                "--time-limit" => {
                    let value = require_value(args, "--time-limit")?;
                    time_limit_secs = value
                        .parse::<u32>()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .ok_or(ArgsError::InvalidTimeLimit { raw: value })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let source = source
            .filter(|s| !s.trim().is_empty())
            .ok_or(ArgsError::MissingSource)?;
        Ok(Self {
            db_url,
            source,
            time_limit_secs,
        })
    }
}

impl PrefsArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = default_db_url();
        let mut draft = PreferencesDraft::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db_url = parse_db_flag(args)?,
                "--sound" => draft.sound_enabled = Some(parse_toggle(args, "--sound")?),
                "--dark-mode" => draft.dark_mode = Some(parse_toggle(args, "--dark-mode")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, draft })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path = std::path::Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// `sqlx` will not create a missing database file on its own.
fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = std::env::var("QUIZ_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };
    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let report = |e: ArgsError| {
        eprintln!("{e}");
        print_usage();
        e
    };
    match cmd {
        Command::Play => play(PlayArgs::parse(&mut iter).map_err(report)?).await,
        Command::Prefs => prefs(PrefsArgs::parse(&mut iter).map_err(report)?).await,
    }
}

async fn prefs(args: PrefsArgs) -> Result<(), Box<dyn std::error::Error>> {
    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;
    let service = PreferencesService::new(Arc::clone(&storage.preferences));

    let current = service.save(args.draft).await?;
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    println!("sound:     {}", on_off(current.sound_enabled()));
    println!("dark mode: {}", on_off(current.dark_mode()));
    Ok(())
}

/// Parts of a snapshot that warrant a full redraw when they change on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Screen {
    generation: u64,
    loading: bool,
    load_status: LoadStatus,
    index: usize,
    complete: bool,
}

impl Screen {
    fn of(snapshot: &QuizSnapshot) -> Self {
        Self {
            generation: snapshot.generation,
            loading: snapshot.loading,
            load_status: snapshot.state.load_status().clone(),
            index: snapshot.state.current_index(),
            complete: snapshot.state.is_complete(),
        }
    }
}

fn draw(snapshot: &QuizSnapshot, palette: Palette) {
    print!("\x1b[2J\x1b[H");
    match &snapshot.summary {
        Some(summary) => println!("{}", render_summary(summary, palette)),
        None => println!("{}", render_state(&snapshot.state, snapshot.loading, palette)),
    }
}

async fn play(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    prepare_sqlite_file(&args.db_url)?;
    let config = SessionConfig {
        time_limit_secs: args.time_limit_secs,
        ..SessionConfig::default()
    };
    let services = AppServices::new_sqlite(&args.db_url, Clock::default(), Arc::new(TerminalBell))
        .await?
        .with_config(config);
    let palette = Palette::for_dark_mode(services.preferences().load().await?.dark_mode());

    tracing::info!(source = %args.source, "starting quiz");
    let (handle, task) = services.start_quiz(provider_for(&args.source));
    handle.load()?;

    let result = drive(&handle, palette).await;

    // the task may already be gone if every handle was dropped
    let _ = handle.shutdown();
    task.await?;
    services.sounds().dispose();
    result
}

async fn drive(handle: &QuizHandle, palette: Palette) -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshots = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let initial = snapshots.borrow_and_update().clone();
    draw(&initial, palette);
    let mut screen = Screen::of(&initial);
    let mut last_remaining = initial.state.time_remaining();
    let mut redraw_on_change = false;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                let next = Screen::of(&snapshot);
                let remaining = snapshot.state.time_remaining();

                if redraw_on_change || next != screen {
                    draw(&snapshot, palette);
                    redraw_on_change = false;
                } else if snapshot.state.is_running()
                    && remaining != last_remaining
                    && remaining == snapshot.state.config().warning_threshold_secs
                {
                    println!("{} left!", snapshot.state.timer().label());
                }
                screen = next;
                last_remaining = remaining;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let snapshot = handle.snapshot();
                match Input::parse(&line) {
                    Input::Place(idx) => handle.place_option(idx)?,
                    Input::Clear(idx) => handle.clear_blank(idx)?,
                    Input::Next if snapshot.state.can_advance() => handle.advance()?,
                    Input::Next => {
                        println!("Fill every blank before moving on.");
                        continue;
                    }
                    Input::Hint => handle.use_hint()?,
                    Input::Restart => {
                        handle.reset()?;
                        handle.load()?;
                    }
                    Input::Quit => break,
                    Input::Help => {
                        println!("{HELP}");
                        continue;
                    }
                    Input::Empty => {
                        draw(&snapshot, palette);
                        continue;
                    }
                    Input::Unknown(raw) => {
                        println!("unknown command: {raw}\n{HELP}");
                        continue;
                    }
                }
                redraw_on_change = true;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
