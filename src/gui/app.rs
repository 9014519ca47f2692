//! Busan Port Dashboard Main Application
//! Main window with control panel and dashboard body.

use crate::config::DashboardConfig;
use crate::data::LoadCache;
use crate::gui::{fonts, ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::DashboardSnapshot;
use crate::{build_snapshot, DashboardError};
use egui::{Color32, RichText, SidePanel};
use std::path::PathBuf;
use tracing::{error, info};

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    cache: LoadCache,
    data_path: PathBuf,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    snapshot: Option<DashboardSnapshot>,
    error: Option<String>,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        fonts::install_hangul_font(&cc.egui_ctx);

        let data_path = config.data_path.clone();
        let mut app = Self {
            cache: LoadCache::new(config.encodings.clone()),
            control_panel: ControlPanel::new(data_path.clone()),
            chart_viewer: ChartViewer::new(),
            data_path,
            config,
            snapshot: None,
            error: None,
        };
        app.load_current();
        app
    }

    /// Load (or fetch from cache) the current file and rebuild the dashboard.
    fn load_current(&mut self) {
        let Some(table) = self.cache.get_or_load(&self.data_path) else {
            let e = DashboardError::NoData(self.data_path.clone());
            error!(path = %self.data_path.display(), "dashboard has no data");
            self.control_panel.clear();
            self.control_panel.set_status(&format!("Error: {}", e));
            self.snapshot = None;
            self.error = Some(e.to_string());
            return;
        };

        self.control_panel.set_loaded(table.encoding(), table.height());
        match table.ports() {
            Ok(ports) => self
                .control_panel
                .update_ports(ports, &self.config.default_ports),
            Err(e) => self.control_panel.set_status(&format!("Error: {}", e)),
        }
        self.refresh();
    }

    /// Recompute the snapshot for the current port selection.
    fn refresh(&mut self) {
        let selected = self.control_panel.get_selected_ports();
        match build_snapshot(&mut self.cache, &self.data_path, &selected) {
            Ok(snapshot) => {
                self.control_panel.set_status(&format!(
                    "Loaded {} rows, latest year {}",
                    snapshot.records.len(),
                    snapshot.summary.latest_year
                ));
                self.snapshot = Some(snapshot);
                self.error = None;
            }
            Err(e) => {
                error!(error = %e, "failed to build dashboard");
                self.control_panel.set_status(&format!("Error: {}", e));
                self.snapshot = None;
                self.error = Some(e.to_string());
            }
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            info!(path = %path.display(), "data file selected");
            self.cache.invalidate(&path);
            self.data_path = path.clone();
            self.control_panel.data_path = path;
            self.control_panel.clear();
            self.load_current();
        }
    }

    /// Drop every cached table and read the file again
    fn handle_reload(&mut self) {
        self.cache.clear();
        self.load_current();
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::PortSelectionChanged => self.refresh(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| match &self.snapshot {
            Some(snapshot) => self.chart_viewer.show(ui, snapshot),
            None => {
                ui.centered_and_justified(|ui| {
                    let message = self.error.as_deref().unwrap_or("No Data");
                    ui.label(
                        RichText::new(message)
                            .size(18.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
            }
        });
    }
}
