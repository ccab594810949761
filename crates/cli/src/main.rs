//! `survey`: command-line front end for a directory-backed survey database.
//!
//! ```text
//! survey init ./data
//! survey exec ./data '{"command": "SurveyList"}'
//! survey types ./data
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use survey_engine::{SurveyConfig, CONFIG_FILE};
use survey_executor::{Command, SurveyDb};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "survey")]
#[command(about = "Survey data store: typed records behind a JSON command API")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a database directory with a default survey.toml
    Init {
        /// Database directory
        dir: PathBuf,
    },
    /// Run one JSON command and print its output
    Exec {
        /// Database directory
        dir: PathBuf,
        /// Command as JSON, or `-` to read it from stdin
        command: String,
    },
    /// List the registered record types
    Types {
        /// Database directory
        dir: PathBuf,
    },
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(format!("surveydb={}", level)))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn init(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating {}", dir.display()))?;
    if !dir.join(CONFIG_FILE).exists() {
        SurveyConfig::default()
            .save(dir)
            .with_context(|| format!("writing {}", CONFIG_FILE))?;
    }
    let db = SurveyDb::open(dir)?;
    db.flush()?;
    info!(target: "surveydb::cli", path = %dir.display(), "Initialized database");
    println!("Initialized survey database in {}", dir.display());
    Ok(())
}

fn parse_command(raw: &str) -> anyhow::Result<Command> {
    let text = if raw == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading command from stdin")?;
        buf
    } else {
        raw.to_string()
    };
    serde_json::from_str(&text).context("parsing command JSON")
}

/// Run one command; returns the process exit code
fn exec(dir: &Path, raw: &str) -> anyhow::Result<i32> {
    let command = parse_command(raw)?;
    let db = SurveyDb::open(dir)?;
    let is_write = command.is_write();

    match db.executor().execute(command) {
        Ok(output) => {
            if is_write {
                db.flush()?;
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(0)
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string_pretty(&e.to_json())?);
            Ok(match e.status_code() {
                400 => 2,
                404 => 3,
                _ => 1,
            })
        }
    }
}

fn types(dir: &Path) -> anyhow::Result<()> {
    let db = SurveyDb::open(dir)?;
    for rt in db.record_types().list()? {
        println!("{}: {}", rt.name, rt.fields.join(", "));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Init { dir } => init(&dir),
        Commands::Exec { dir, command } => {
            let code = exec(&dir, &command)?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Commands::Types { dir } => types(&dir),
    }
}
