//! Galley - Entry point

use std::path::PathBuf;

use anyhow::Context;
use tracing::{error, info};

use galley::{app, AppState};
use galley_config::{ConfigLoader, GalleyConfig};
use galley_telemetry::{init_logging, LogConfig};

/// Command-line arguments.
struct Args {
    /// Path to configuration file.
    config: Option<PathBuf>,
    /// Preset the configuration starts from.
    profile: String,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let mut config = None;
        let mut profile = "default".to_string();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    config = args.next().map(PathBuf::from);
                }
                "--profile" | "-p" => {
                    if let Some(name) = args.next() {
                        profile = name;
                    }
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("galley {}", galley::VERSION);
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {other}");
                    eprintln!("Use --help for usage information");
                    std::process::exit(1);
                }
            }
        }

        Self { config, profile }
    }
}

fn print_help() {
    println!(
        r"Galley - In-memory dishes and orders API

USAGE:
    galley [OPTIONS]

OPTIONS:
    -c, --config <PATH>    Path to configuration file (TOML or JSON)
                           [default: ./galley.toml if present]
    -p, --profile <NAME>   Starting preset: default, development or production
    -h, --help             Print help information
    -v, --version          Print version information

ENVIRONMENT VARIABLES:
    GALLEY__SERVER__HTTP_ADDR             Listen address (default: 127.0.0.1:5000)
    GALLEY__SERVER__REQUEST_TIMEOUT_MS    Per-request time limit
    GALLEY__SERVER__MAX_BODY_BYTES        Largest accepted request body
    GALLEY__LOGGING__LEVEL                Log filter, e.g. info or galley=debug
    GALLEY__LOGGING__FORMAT               json or pretty
    GALLEY__SEED__DISHES_PATH             JSON array of dishes loaded at startup
    GALLEY__SEED__ORDERS_PATH             JSON array of orders loaded at startup
    GALLEY__ORDERS__PERSIST_UPDATES       Write PUT /orders/{{orderId}} back (default: true)

A .env file in the working directory is read first.

EXAMPLES:
    # Run with configuration file
    galley --config galley.toml

    # Run with environment variables
    GALLEY__SERVER__HTTP_ADDR=0.0.0.0:8080 galley
"
    );
}

const DEFAULT_CONFIG_FILE: &str = "galley.toml";

fn load_config(args: Args) -> anyhow::Result<GalleyConfig> {
    let loader = ConfigLoader::new().with_profile(&args.profile)?;
    let loader = match args.config {
        Some(path) => loader
            .with_file(&path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => loader
            .with_optional_file(DEFAULT_CONFIG_FILE)
            .context("failed to load galley.toml")?,
    };
    let config = loader
        .with_dotenv()?
        .with_env_prefix("GALLEY")
        .load()
        .context("invalid configuration")?;
    Ok(config)
}

async fn run(config: GalleyConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config).context("failed to load seed data")?;

    info!(version = galley::VERSION, addr = %config.server.http_addr, "starting galley");

    app(&state, config.server).run().await?;
    info!("galley stopped");
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&LogConfig::from_config(&config)) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        error!(error = %format!("{e:#}"), "galley exited with error");
        std::process::exit(1);
    }
}
