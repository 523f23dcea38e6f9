//! ShopDash - Terminal Statistics Dashboard
//!
//! A CLI client for the shop admin REST API: aggregates product,
//! user, category, order, and revenue summaries into one dashboard
//! and renders Markdown/JSON reports. Can also submit new product
//! variants from a payload file.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (connection, config, failed aggregation, etc.)

mod api;
mod catalog;
mod charts;
mod cli;
mod config;
mod models;
mod report;
mod stats;

use anyhow::{Context, Result};
use api::ApiClient;
use catalog::ProductForm;
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{Dashboard, DashboardMetadata, ViewState};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("ShopDash v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        error!("Run failed: {}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .shopdash.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".shopdash.toml");

    if path.exists() {
        anyhow::bail!(".shopdash.toml already exists. Remove it first or edit it manually.");
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .shopdash.toml")?;

    println!("✅ Created .shopdash.toml with default settings.");
    println!("   Edit it to customize the API URL, timeout, and report output.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch to the dashboard or the product submission flow.
async fn run(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let api = ApiClient::new(&config.api.base_url, config.api.timeout_seconds)
        .context("Failed to create API client")?;

    if let Some(ref payload) = args.add_product {
        return handle_add_product(&api, payload).await;
    }

    run_dashboard(&args, &config, &api).await
}

/// Run the statistics dashboard: aggregate, project, render.
async fn run_dashboard(args: &Args, config: &Config, api: &ApiClient) -> Result<()> {
    let start_time = Instant::now();

    // Loading state: spinner while the aggregation is in flight
    let spinner = if args.quiet {
        None
    } else {
        Some(loading_spinner())
    };

    let mut view: ViewState<Dashboard> = ViewState::Loading;
    let outcome = stats::aggregate(api).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let duration = start_time.elapsed().as_secs_f64();

    view = view.resolve(outcome.map(|output| {
        let charts = charts::project(&output.stats, &output.categories);
        Dashboard {
            metadata: DashboardMetadata {
                api_url: api.base_url().to_string(),
                fetched_at: Utc::now(),
                duration_seconds: duration,
            },
            stats: output.stats,
            categories: output.categories,
            charts,
        }
    }));

    match view {
        ViewState::Loading => unreachable!("view resolved above"),
        ViewState::Error(message) => Err(anyhow::anyhow!(message)),
        ViewState::Success(dashboard) => {
            render_dashboard(args, config, &dashboard)?;
            Ok(())
        }
    }
}

/// Success state: print summary tiles and write the report file.
fn render_dashboard(args: &Args, config: &Config, dashboard: &Dashboard) -> Result<()> {
    println!("\n📊 Statistics Dashboard:");
    for tile in report::summary_tiles(&dashboard.stats) {
        println!("   {}: {}", tile.title, tile.value);
    }

    let status = &dashboard.charts.status;
    if status.labels.is_empty() {
        println!("   Đơn hàng theo trạng thái: (none)");
    } else {
        let breakdown: Vec<String> = status
            .labels
            .iter()
            .zip(&status.values)
            .map(|(label, value)| format!("{} {}", label, value))
            .collect();
        println!("   Đơn hàng theo trạng thái: {}", breakdown.join(", "));
    }
    println!("   Duration: {:.1}s", dashboard.metadata.duration_seconds);

    if args.no_report {
        debug!("--no-report set, skipping report file");
        return Ok(());
    }

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(dashboard)?,
        OutputFormat::Markdown => report::generate_markdown_report(dashboard),
    };

    std::fs::write(&config.report.output, &output)
        .with_context(|| format!("Failed to write report to {}", config.report.output))?;

    println!("\n✅ Report saved to: {}", config.report.output);
    Ok(())
}

/// Handle --add-product: load, validate, and submit a product payload.
async fn handle_add_product(api: &ApiClient, payload: &Path) -> Result<()> {
    let form = ProductForm::load(payload)?;

    if let Err(e) = form.validate() {
        anyhow::bail!("Invalid product payload: {}", e);
    }

    println!("📦 Submitting product {} ...", form.id);
    catalog::submit_product(api, &form).await?;

    println!("✅ Đã thêm sản phẩm thành công!");
    Ok(())
}

/// Spinner shown while the view is in the Loading state.
fn loading_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Loading...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .shopdash.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
