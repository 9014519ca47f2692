//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
pub mod fonts;
mod metric_cards;

pub use app::DashboardApp;
pub use chart_viewer::{ChartViewer, DashboardTab};
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use metric_cards::{format_thousands, metric_cards, MetricCard, Tone};
