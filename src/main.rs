//! Busan Port Dashboard - annual cargo volume statistics
//!
//! Opens the dashboard window, or prints the summary as JSON with `--summary`.

use anyhow::Context;
use busan_port_dashboard::config::DashboardConfig;
use busan_port_dashboard::data::LoadCache;
use busan_port_dashboard::gui::DashboardApp;
use busan_port_dashboard::build_snapshot;
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "busan-port-dashboard")]
#[command(about = "Busan Port annual cargo volume dashboard")]
struct Cli {
    #[arg(short, long, help = "Path to the volume CSV file")]
    data: Option<PathBuf>,

    #[arg(short, long, help = "Path to a JSON configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Print the dashboard summary as JSON and exit")]
    summary: bool,

    #[arg(long = "port", value_name = "PORT", help = "Port to compare (repeatable)")]
    ports: Vec<String>,

    #[arg(long, help = "Log filter, e.g. info or busan_port_dashboard=debug")]
    log_level: Option<String>,
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    fn apply(&self, config: &mut DashboardConfig) {
        if let Some(data) = &self.data {
            config.data_path = data.clone();
        }
        if !self.ports.is_empty() {
            config.default_ports = self.ports.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(config: &DashboardConfig) -> anyhow::Result<()> {
    let mut cache = LoadCache::new(config.encodings.clone());
    let snapshot = build_snapshot(&mut cache, &config.data_path, &config.default_ports)?;
    let json = serde_json::to_string_pretty(&snapshot).context("failed to serialize summary")?;
    println!("{}", json);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    init_logging(&config.log_level);

    if cli.summary {
        return print_summary(&config);
    }

    info!(path = %config.data_path.display(), "starting dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("부산항 물동량 대시보드"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Busan Port Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start dashboard: {}", e))
}
