//! Polly Dashboard CLI
//!
//! Command-line access to the volume inventory pipeline:
//! - List volumes from the inventory endpoint, across all services, or
//!   inspect one by id
//! - Render volume cards or the full dashboard page
//! - Keep a rendered page up to date on an interval
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use polly_dashboard::{
    logging, ChartPanel, Config, DashboardPage, Document, FailurePolicy, InventoryFetcher,
    InventoryPipeline, RefreshPolicy, RenderMode, VolumeRecord,
};

#[derive(Parser)]
#[command(name = "polly-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Storage inventory dashboard for Polly")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Inventory endpoint, overriding the config
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Render mode (escaped, verbatim), overriding the config
    #[arg(long, global = true)]
    pub mode: Option<RenderMode>,

    /// Output format for `fetch` (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List volumes from the inventory endpoint
    Fetch {
        /// Inspect a single volume by id
        #[arg(long, conflicts_with = "all")]
        volume_id: Option<String>,
        /// List volumes across all services (`volumesall`)
        #[arg(long)]
        all: bool,
    },

    /// Fetch once and print the rendered volume cards
    Render {
        /// Print the full dashboard page instead of the cards only
        #[arg(long)]
        page: bool,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-run the pipeline into one page on an interval
    Watch {
        /// Page file to keep up to date
        #[arg(short, long)]
        output: PathBuf,
        /// Seconds between runs (default: from config)
        #[arg(short, long)]
        interval: Option<u64>,
        /// Stop after this many runs
        #[arg(long)]
        runs: Option<u64>,
        /// Refresh policy (append, replace), overriding the config
        #[arg(long)]
        refresh: Option<RefreshPolicy>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => Config::load_default(),
    };
    if let Some(endpoint) = &cli.endpoint {
        config.inventory.endpoint = endpoint.clone();
    }
    if let Some(mode) = cli.mode {
        config.render.mode = mode;
    }

    logging::init(&config.logging);

    match cli.command {
        Commands::Fetch { volume_id, all } => {
            let fetcher = InventoryFetcher::new(config.inventory.client_config())?;

            let volumes = match (volume_id, all) {
                (Some(id), _) => {
                    let volume = fetcher
                        .fetch_volume(&id)
                        .await
                        .with_context(|| format!("inspecting volume {}", id))?;

                    if cli.format == "json" {
                        println!("{}", serde_json::to_string_pretty(&volume)?);
                        return Ok(());
                    }
                    vec![volume]
                }
                (None, true) => fetcher
                    .fetch_all()
                    .await
                    .context("fetching volumes for all services")?,
                (None, false) => fetcher
                    .fetch_volumes()
                    .await
                    .with_context(|| format!("fetching {}", config.inventory.endpoint))?,
            };

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&volumes)?),
                _ => print_table(&volumes),
            }
        }

        Commands::Render { page, output } => {
            // A one-shot render should say why nothing came back
            config.dashboard.failure_policy = FailurePolicy::Surface;
            let pipeline = InventoryPipeline::from_config(&config)?;

            let mut doc = Document::with_container(pipeline.container_id());
            let report = pipeline
                .run(&mut doc)
                .await
                .with_context(|| format!("rendering {}", config.inventory.endpoint))?;

            let html = if page {
                let charts = ChartPanel::default();
                DashboardPage::new(&charts)
                    .container_id(pipeline.container_id())
                    .render(&doc)
            } else {
                doc.get_element_by_id(pipeline.container_id())
                    .map(|c| c.inner_html())
                    .unwrap_or_default()
            };

            write_output(output.as_ref(), &html)?;
            eprintln!("Rendered {} volumes", report.appended);
        }

        Commands::Watch {
            output,
            interval,
            runs,
            refresh,
        } => {
            if let Some(refresh) = refresh {
                config.dashboard.refresh_policy = refresh;
            }
            let interval = interval.unwrap_or(config.dashboard.watch_interval_secs).max(1);
            watch(&config, &output, Duration::from_secs(interval), runs).await?;
        }

        Commands::Config { output } => {
            let config = polly_dashboard::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Keep one long-lived page: every tick runs the pipeline into the same
/// document and rewrites the output file.
async fn watch(
    config: &Config,
    output: &PathBuf,
    interval: Duration,
    runs: Option<u64>,
) -> anyhow::Result<()> {
    let pipeline = InventoryPipeline::from_config(config)?;
    let charts = ChartPanel::default();
    let mut doc = Document::with_container(pipeline.container_id());
    let mut ticker = tokio::time::interval(interval);
    let mut completed = 0u64;

    tracing::info!(
        output = ?output,
        interval_secs = interval.as_secs(),
        refresh = ?config.dashboard.refresh_policy,
        "Watching volume inventory"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watch");
                break;
            }
        }

        let notice = match pipeline.run(&mut doc).await {
            Ok(report) => {
                tracing::info!(
                    appended = report.appended,
                    children = report.children,
                    "Dashboard page refreshed"
                );
                None
            }
            Err(e) => {
                tracing::warn!("Refresh failed: {}", e);
                Some(e.to_string())
            }
        };

        let html = DashboardPage::new(&charts)
            .container_id(pipeline.container_id())
            .notice(notice.as_deref())
            .render(&doc);
        write_output(Some(output), &html)?;

        completed += 1;
        if runs.is_some_and(|limit| completed >= limit) {
            break;
        }
    }

    Ok(())
}

fn write_output(path: Option<&PathBuf>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("writing {:?}", path)),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

fn print_table(volumes: &[VolumeRecord]) {
    if volumes.is_empty() {
        println!("No volumes");
        return;
    }

    println!(
        "{:<24} {:<20} {:<10} {:<8} {:<14} {:<14} {:<10} {:<12}",
        "ID", "Name", "Size", "Type", "Service", "Provider", "AZ", "Scheduler"
    );
    println!("{}", "-".repeat(119));

    for v in volumes {
        println!(
            "{:<24} {:<20} {:<10} {:<8} {:<14} {:<14} {:<10} {:<12}",
            v.id_text(),
            v.name_text(),
            v.size_text(),
            v.type_text(),
            v.service_name_text(),
            v.storage_provider_name_text(),
            v.availability_zone_text(),
            v.scheduler_text()
        );
    }

    println!();
    println!("{} volumes", volumes.len());
}
