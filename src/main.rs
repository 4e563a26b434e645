//! Binary entry point for dayzero.
//!
//! This binary provides the CLI interface for the dayzero mention tracker.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow unnecessary_wraps for consistent command function signatures
#![allow(clippy::unnecessary_wraps)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow option_if_let_else for environment variable fallback chains
#![allow(clippy::option_if_let_else)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use chrono::Utc;
use clap::{Parser, Subcommand};
use dayzero::config::TrackerConfig;
use dayzero::observability::{self, LoggingConfig};
use dayzero::services::TrackerService;
use dayzero::{feed, rendering};
use std::process::ExitCode;

/// Dayzero - a "days without a mention" counter for chat streams.
#[derive(Parser)]
#[command(name = "dayzero")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the feed loop over stdin and stdout.
    Run,

    /// Evaluate one message against the counter and print the reply, if any.
    Check {
        /// Message text. Read from stdin when omitted.
        text: Option<String>,
    },

    /// Show how long the topic has gone unmentioned.
    Status,

    /// Record a confirmed mention and restart the counter.
    Reset,

    /// Manage configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig::from_env(cli.verbose || config.debug);
    if let Err(e) = observability::init(&logging) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: TrackerConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Run => cmd_run(config),

        Commands::Check { text } => cmd_check(&config, text),

        Commands::Status => cmd_status(&config),

        Commands::Reset => cmd_reset(&config),

        Commands::Config { show } => cmd_config(config, show),
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<TrackerConfig, Box<dyn std::error::Error>> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return TrackerConfig::load_from_file(std::path::Path::new(config_path))
            .map_err(std::convert::Into::into);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("DAYZERO_CONFIG") {
        if !config_path.trim().is_empty() {
            return TrackerConfig::load_from_file(std::path::Path::new(&config_path))
                .map_err(std::convert::Into::into);
        }
    }

    // Otherwise, load from default location
    TrackerConfig::load_default().map_err(std::convert::Into::into)
}

/// Run command.
fn cmd_run(config: TrackerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = TrackerService::from_config(&config)?;

    ctrlc::set_handler(|| {
        tracing::info!("interrupt received, shutting down");
        std::process::exit(0);
    })?;

    tracing::info!(
        topic = service.topic(),
        state_file = %config.state_file.display(),
        recorded = service.is_recorded(),
        "feed loop starting"
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let handled = feed::run_loop(&service, stdin.lock(), &mut stdout)?;

    tracing::info!(handled, "feed stream closed");

    Ok(())
}

/// Check command.
fn cmd_check(
    config: &TrackerConfig,
    text: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = TrackerService::from_config(config)?;

    let input = match text {
        Some(text) => text,
        None => read_stdin_text()?,
    };

    // Prints nothing for a suppressed hit or a keyword-free message,
    // exactly like the feed.
    if let Some(reply) = service.check_message(&input, Utc::now()) {
        println!("{reply}");
    }

    Ok(())
}

/// Status command.
fn cmd_status(config: &TrackerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = TrackerService::from_config(config)?;
    let report = service.status(Utc::now());

    println!("{}", rendering::render_status(service.topic(), report));

    Ok(())
}

/// Reset command.
fn cmd_reset(config: &TrackerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = TrackerService::from_config(config)?;
    let summary = service.reset(Utc::now())?;

    println!("{}", rendering::render_reset(service.topic(), summary));

    Ok(())
}

/// Config command.
fn cmd_config(config: TrackerConfig, show: bool) -> Result<(), Box<dyn std::error::Error>> {
    if show {
        println!("Current Configuration");
        println!("=====================");
        println!();
        println!("Topic: {}", config.topic);
        println!("Cooldown: {} minutes", config.cooldown_minutes);
        println!("State File: {}", config.state_file.display());
        println!("Debug: {}", config.debug);
        println!();
        println!("Keywords:");
        for rule in &config.keywords {
            let form = if rule.allow_suffix {
                "suffix forms allowed"
            } else {
                "exact word only"
            };
            println!("  {} ({form})", rule.phrase);
        }
    } else {
        println!("Use --show to display configuration");
    }

    Ok(())
}

/// Reads check input from stdin as a string.
fn read_stdin_text() -> Result<String, Box<dyn std::error::Error>> {
    use std::io::{self, Read};

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    Ok(input)
}
