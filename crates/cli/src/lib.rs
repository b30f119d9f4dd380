pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use partdesk_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "partdesk",
    about = "Appliance-parts support assistant CLI",
    long_about = "Route appliance-parts queries through the partdesk agent: one-shot queries, \
                  an interactive session with context carry-over, and config inspection.",
    after_help = "Examples:\n  partdesk query \"I need a water filter for my refrigerator\"\n  partdesk repl\n  partdesk config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a partdesk.toml config file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Process a single query and print the dispatch result as JSON")]
    Query {
        #[arg(required = true, help = "The query text")]
        text: Vec<String>,
    },
    #[command(about = "Run an interactive session with context carry-over between turns")]
    Repl,
    #[command(about = "Inspect effective configuration values with secrets redacted")]
    Config,
}

fn init_logging(config: &AppConfig) {
    use partdesk_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        ..LoadOptions::default()
    };
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("config error: {error}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);

    let result = match cli.command {
        Command::Query { text } => commands::query::run(&config, &text.join(" ")).await,
        Command::Repl => commands::repl::run(&config).await,
        Command::Config => commands::config::run(&config),
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
