//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// ShopDash - terminal statistics dashboard for the shop admin API
///
/// Fetches product, user, category, order, and revenue summaries from
/// the shop backend, merges them into one view, and renders summary
/// tiles plus chart data as a Markdown or JSON report.
///
/// Examples:
///   shopdash
///   shopdash --api-url http://localhost:8000 --format json -o stats.json
///   shopdash --add-product new_variant.toml
///   shopdash --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Base URL of the shop admin REST API
    ///
    /// Can also be set via SHOPDASH_API_URL or .shopdash.toml.
    #[arg(short, long, value_name = "URL", env = "SHOPDASH_API_URL")]
    pub api_url: Option<String>,

    /// Output file path for the report
    ///
    /// Defaults to shopdash_report.md (or the config file setting).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .shopdash.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the dashboard to the terminal only, skip the report file
    #[arg(long)]
    pub no_report: bool,

    /// Submit a new product variant from a TOML or JSON payload file
    /// instead of rendering the dashboard
    #[arg(long, value_name = "FILE")]
    pub add_product: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .shopdash.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate API URL format when given on the command line
        if let Some(ref url) = self.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("API URL must start with 'http://' or 'https://'".to_string());
            }
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate the product payload file if provided
        if let Some(ref path) = self.add_product {
            if !path.exists() {
                return Err(format!("Product file does not exist: {}", path.display()));
            }
            if !path.is_file() {
                return Err(format!("Product path is not a file: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
