use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use app_utils::{OutputFormat, Settings};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sexp-authz")]
#[command(version, about = "Canonical S-expression parser and authorization matcher", long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log parser and matcher decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an expression and pretty-print it
    Parse {
        /// Expression in canonical form
        #[arg(required_unless_present = "file")]
        expr: Option<String>,

        /// Read the expression bytes from a file instead
        #[arg(short, long, conflicts_with = "expr")]
        file: Option<PathBuf>,
    },
    /// Check whether a query satisfies a rule
    Match {
        /// Rule in canonical form
        #[arg(long)]
        rule: String,

        /// Query in canonical form
        #[arg(long)]
        query: String,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a YAML match suite
    Suite {
        /// Path to the suite YAML file
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse an expression and print its canonical encoding
    Encode {
        /// Expression in canonical form
        expr: String,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings(cli.config.as_ref())?;
    if !settings.output.color {
        colored::control::set_override(false);
    }
    let json_default = settings.output.format == OutputFormat::Json;

    match cli.command {
        Commands::Parse { expr, file } => {
            commands::parse::run(expr.as_deref(), file.as_deref(), &settings)
        }
        Commands::Match { rule, query, json } => {
            commands::authorize::run(&rule, &query, json || json_default, &settings)
        }
        Commands::Suite { file, json } => {
            commands::suite::run(&file, json || json_default, &settings)
        }
        Commands::Encode { expr } => commands::encode::run(&expr, &settings),
    }
}
