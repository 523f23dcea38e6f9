//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.shopdash.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the shop admin REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_output() -> String {
    "shopdash_report.md".to_string()
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".shopdash.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref api_url) = args.api_url {
            self.api.base_url = api_url.clone();
        }

        if let Some(timeout) = args.timeout {
            self.api.timeout_seconds = timeout;
        }

        if let Some(ref output) = args.output {
            self.report.output = output.display().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Args, OutputFormat};
    use std::path::PathBuf;

    fn make_args() -> Args {
        Args {
            api_url: None,
            output: None,
            format: OutputFormat::Markdown,
            config: None,
            timeout: None,
            no_report: false,
            add_product: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.report.output, "shopdash_report.md");
        assert!(!config.general.verbose);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[api]
base_url = "https://shop.example.com/api"
timeout_seconds = 10

[report]
output = "stats.md"

[general]
verbose = true
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.report.output, "stats.md");
        assert!(config.general.verbose);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"http://10.0.0.1:8000\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.1:8000");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.report.output, "shopdash_report.md");
    }

    #[test]
    fn test_merge_with_args_overrides_when_provided() {
        let mut config = Config::default();
        let mut args = make_args();
        args.api_url = Some("http://other:9000".to_string());
        args.timeout = Some(5);
        args.output = Some(PathBuf::from("out.json"));
        args.verbose = true;

        config.merge_with_args(&args);

        assert_eq!(config.api.base_url, "http://other:9000");
        assert_eq!(config.api.timeout_seconds, 5);
        assert_eq!(config.report.output, "out.json");
        assert!(config.general.verbose);
    }

    #[test]
    fn test_merge_with_args_keeps_config_when_absent() {
        let mut config = Config::default();
        config.api.base_url = "http://from-file:8000".to_string();

        config.merge_with_args(&make_args());

        assert_eq!(config.api.base_url, "http://from-file:8000");
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("[general]"));
    }
}
