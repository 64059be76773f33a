//! addressd - Main Entry Point
//!
//! Loads configuration, wires the Google provider clients into the HTTP
//! server, and runs until interrupted.

use addressd::config::AppConfig;
use addressd::observability::init_default_logging;
use addressd::server::ApiServer;
use addressd::validation::providers::google::{GoogleAddressValidator, GoogleValidationConfig};
use addressd::validation::providers::places::{GooglePlacesSuggestions, PlacesConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// US address validation service
#[derive(Parser)]
#[command(name = "addressd")]
#[command(about = "US address validation and deliverability assessment service")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Run,
    /// Validate configuration
    Config {
        /// Show the resolved configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    info!("Starting addressd v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run => run_server(config).await,
        Commands::Config { show } => handle_config_command(config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {e}");
        process::exit(1);
    }

    info!("Shutdown complete");
}

fn load_configuration(
    config_path: &Option<PathBuf>,
) -> Result<AppConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Ok(AppConfig::load_from_file(path)?)
        }
        None => {
            // Try default locations, then fall back to env-only defaults
            let default_paths = ["addressd.toml", "config/addressd.toml"];

            for path_str in default_paths {
                let path = PathBuf::from(path_str);
                if path.exists() {
                    info!("Loading configuration from: {}", path.display());
                    return Ok(AppConfig::load_from_file(&path)?);
                }
            }

            info!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

async fn run_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let google_api_key = config.get_google_api_key()?;

    let validator = GoogleAddressValidator::new(GoogleValidationConfig {
        api_key: google_api_key.clone(),
        base_url: config.google.validation_url.clone(),
        timeout: config.validation_timeout(),
        referer: config.google.referer.clone(),
    })?;

    let suggestions = GooglePlacesSuggestions::new(PlacesConfig {
        api_key: google_api_key,
        base_url: config.google.places_url.clone(),
        timeout: config.suggestion_timeout(),
    });

    let server = ApiServer::new(&config, Arc::new(validator), Arc::new(suggestions));

    tokio::select! {
        _ = server.start() => {}
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    Ok(())
}

fn handle_config_command(config: AppConfig, show: bool) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    println!("Configuration is valid");

    if show {
        println!("{}", toml::to_string_pretty(&config)?);
    }

    Ok(())
}
