//! # EcoScan CLI
//!
//! Command-line interface for EcoScan.
//!
//! EcoScan classifies photographed items into recyclable material
//! categories with a vision model, sanitizes the model's answer into a
//! strict schema, and enriches it with disposal metadata.
//!
//! ## Commands
//!
//! - `ecoscan scan <IMAGE>` - Classify a local image file
//! - `ecoscan serve` - Run the HTTP scan service
//! - `ecoscan config show|init|path` - Manage configuration
//!
//! ## Examples
//!
//! ```bash
//! # Classify a photo
//! ecoscan scan bottle.jpg
//!
//! # Get JSON output
//! ecoscan scan bottle.jpg --format json
//!
//! # Run the service without live credentials
//! ecoscan serve --mock
//! ```

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Parser, Subcommand};
use ecoscan_classify::Classifier;
use ecoscan_core::ScanReport;
use ecoscan_enrich::EnrichmentTable;
use ecoscan_server::AppState;
use ecoscan_vision::{CannedVision, GeminiConfig, GeminiVision};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "ecoscan")]
#[command(about = "Recyclable item classification from photos")]
#[command(version)]
struct Cli {
    /// Path to config file (default: ~/.config/ecoscan/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a photo of an item
    Scan {
        /// Path to the image file (JPEG)
        image: PathBuf,

        /// Use the canned demo model instead of the live API
        #[arg(long)]
        mock: bool,
    },

    /// Run the HTTP scan service
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Use the canned demo model instead of the live API
        #[arg(long)]
        mock: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print sample configuration file
    Init,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_from(cli.config.clone()).context("Failed to load config")?;

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        config.logging.level.parse::<Level>().unwrap_or(Level::INFO)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    match cli.command {
        Commands::Scan { image, mock } => {
            let bytes =
                std::fs::read(&image).with_context(|| format!("failed to read {}", image.display()))?;

            let classifier = build_classifier(&config, mock)?;
            let enrichment = EnrichmentTable::new();

            let record = classifier.classify(&STANDARD.encode(&bytes)).await;
            let report = enrichment.enrich(&record);

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => print_report(&report),
            }
        }

        Commands::Serve { host, port, mock } => {
            let classifier = build_classifier(&config, mock)?;

            let state = AppState {
                classifier: Arc::new(classifier),
                enrichment: Arc::new(EnrichmentTable::new()),
                limits: config.validation.limits(),
            };

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            ecoscan_server::serve(state, &host, port).await?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => match cli.format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&config)
                            .context("Failed to serialize config")?
                    );
                }
                OutputFormat::Text => {
                    println!(
                        "{}",
                        toml::to_string_pretty(&config).context("Failed to serialize config")?
                    );
                }
            },
            ConfigAction::Init => {
                println!("{}", Config::sample_toml()?);
            }
            ConfigAction::Path => {
                if let Some(path) = Config::config_path() {
                    println!("{}", path.display());
                } else {
                    println!("Could not determine config directory");
                }
            }
        },
    }

    Ok(())
}

/// Build the classifier from config: canned model in demo mode, the live
/// Gemini client when a key is available, otherwise no model (every scan
/// returns the fallback record).
fn build_classifier(config: &Config, force_mock: bool) -> Result<Classifier> {
    if force_mock || config.demo.mock {
        info!("using canned demo model");
        let model = CannedVision::plastic_bottle()
            .with_delay(Duration::from_millis(config.demo.mock_delay_ms));
        return Ok(Classifier::with_model(Arc::new(model)));
    }

    match config.resolved_api_key() {
        Some(api_key) => {
            let model = GeminiVision::new(GeminiConfig {
                api_key,
                model: config.model.model.clone(),
                api_base: config.model.api_base.clone(),
                temperature: config.model.temperature as f32,
                max_output_tokens: config.model.max_output_tokens,
                timeout: Duration::from_secs(config.model.timeout_secs),
            })?;
            info!(model = %config.model.model, "using Gemini vision model");
            Ok(Classifier::with_model(Arc::new(model)))
        }
        None => {
            warn!("no API key configured; scans will return the fallback record");
            Ok(Classifier::disabled())
        }
    }
}

fn print_report(report: &ScanReport) {
    let record = &report.classification;
    let enrichment = &report.enrichment;

    println!("Item:       {}", record.item_name);
    println!(
        "Material:   {} ({})",
        record.material.as_str(),
        enrichment.material_code
    );
    println!(
        "Recyclable: {}",
        if record.recyclable { "yes" } else { "no" }
    );
    println!("Confidence: {}", record.confidence.as_str());
    println!("Points:     {}", enrichment.points_earned);
    println!("Disposal:   {}", enrichment.disposal_action);
    println!(
        "Nearest:    {} ({:.4}, {:.4})",
        enrichment.nearest_center.name, enrichment.nearest_center.lat, enrichment.nearest_center.lng
    );
}
