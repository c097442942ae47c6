//! ftags CLI - tag files, find them again by tag

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, ValueEnum};
use ftags::config::load_config;
use ftags::{MatchMode, StoreLocation, TagStore};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use commands::Invocation;

#[derive(Parser)]
#[command(name = "ftags")]
#[command(version)]
#[command(about = "Tag files and directories, find them again by tag")]
#[command(long_about = r#"
ftags keeps file tags in a .ftags.db store. The store is looked up in the
current directory and its parents, falling back to ~/.ftags.db.

Example usage:
  ftags                        list tags, most used first
  ftags report.pdf             show the tags of a file
  ftags report.pdf work 2024   tag a file
  ftags work                   list files tagged "work"
  ftags --init                 create a store in the current directory

Tag names are case-sensitive and must not be empty or whitespace-only.
"#)]
struct Cli {
    /// A path plus tags to assign, a path alone, or tags to search for.
    /// Tag names must not be empty or whitespace-only
    args: Vec<String>,

    /// Use ./.ftags.db instead of searching parent directories
    #[arg(short, long)]
    init: bool,

    /// Launch PROGRAM with the matched files as arguments
    #[arg(short, long, value_name = "PROGRAM")]
    exec: Option<String>,

    /// Also list tags that no file carries
    #[arg(short, long)]
    all: bool,

    /// Only match files that carry every given tag
    #[arg(short, long)]
    match_all: bool,

    /// Show store statistics
    #[arg(long)]
    stats: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputMode,

    /// Config file (defaults to <config dir>/ftags/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    #[value(name = "text")]
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    debug_assert!(!output_mode.is_human());
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn emit_error(output_mode: OutputMode, err: &anyhow::Error) {
    if output_mode.is_human() {
        ftags::ui::error(&format!("{err:#}"));
        return;
    }

    let sql = err.downcast_ref::<ftags::Error>().and_then(|e| e.sql());
    let envelope = serde_json::json!({
        "ok": false,
        "error": format!("{err:#}"),
        "statement": sql,
    });
    match serde_json::to_string_pretty(&envelope) {
        Ok(text) => println!("{text}"),
        Err(_) => ftags::ui::error(&format!("{err:#}")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "invocation failed");
            emit_error(cli.format, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?.unwrap_or_default();

    let location = if cli.init {
        StoreLocation::init_here()?
    } else {
        StoreLocation::locate()?
    };
    tracing::debug!(path = %location.path.display(), mode = ?location.mode, "using store");

    let store = TagStore::open(&location.path)?;
    if store.was_created() {
        ftags::ui::info("Store initialized at", &location.path.display().to_string());
    }

    if cli.stats {
        return commands::run_stats(&store, &location, cli.format);
    }

    let cwd = std::env::current_dir()?;
    let invocation = Invocation::classify(&cli.args, &cwd);
    tracing::debug!(?invocation, "dispatch");

    match invocation {
        Invocation::ListTags => {
            let show_unused = cli.all || config.show_unused();
            commands::run_list_tags(&store, show_unused, cli.format)
        }
        Invocation::ShowFile(path) => commands::run_show_file(&store, &path, cli.format),
        Invocation::Assign(path, tags) => commands::run_assign(&store, &path, &tags, cli.format),
        Invocation::Query(tags) => {
            let mode = if cli.match_all { MatchMode::All } else { MatchMode::Any };
            let exec = cli.exec.as_deref().or(config.exec.as_deref());
            commands::run_query(&store, &tags, mode, exec, cli.format)
        }
    }
}
