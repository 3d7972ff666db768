mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use commands::{cmd_normalize, cmd_parse, cmd_sections};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "OTTOMAP_LOG";

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// TribeNet turn report parser.
#[derive(Parser)]
#[command(name = "ottomap", version, about = "TribeNet turn report parser")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log pipeline decisions to stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// Path to a configuration file (default: ./ottomap.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a turn report into per-unit movement and status records
    Parse {
        /// Path to the turn report text file
        file: PathBuf,
    },

    /// Show how a turn report splits into unit sections
    Sections {
        /// Path to the turn report text file
        file: PathBuf,
        /// Do not separate units with blank lines
        #[arg(long)]
        compact: bool,
    },

    /// Print the normalized text of a turn report
    Normalize {
        /// Path to the turn report text file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, cli.output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Parse { file } => {
            cmd_parse(&file, &config, cli.output, cli.quiet);
        }
        Commands::Sections { file, compact } => {
            cmd_sections(&file, compact, &config, cli.output, cli.quiet);
        }
        Commands::Normalize { file } => {
            cmd_normalize(&file, &config, cli.output, cli.quiet);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Report an error to stderr in the selected output format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}
