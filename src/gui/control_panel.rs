//! Control Panel Widget
//! Left side panel with the data source and the port filter.

use crate::data::TextEncoding;
use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

/// Left side control panel with file selection and port selection.
pub struct ControlPanel {
    pub data_path: PathBuf,
    pub ports: Vec<String>,
    pub selected_ports: Vec<bool>,
    pub encoding: Option<TextEncoding>,
    pub row_count: usize,
    pub status: String,
}

impl ControlPanel {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            data_path,
            ports: Vec::new(),
            selected_ports: Vec::new(),
            encoding: None,
            row_count: 0,
            status: "Ready".to_string(),
        }
    }

    /// Replace the port list. A port stays selected if it was selected before,
    /// or, on first fill, if it is one of `defaults`.
    pub fn update_ports(&mut self, ports: Vec<String>, defaults: &[String]) {
        let previous = self.get_selected_ports();
        let first_fill = self.ports.is_empty();

        self.selected_ports = ports
            .iter()
            .map(|port| {
                if first_fill {
                    defaults.contains(port)
                } else {
                    previous.contains(port)
                }
            })
            .collect();
        self.ports = ports;
    }

    /// Ports ticked in the filter, in table order.
    pub fn get_selected_ports(&self) -> Vec<String> {
        self.ports
            .iter()
            .zip(self.selected_ports.iter())
            .filter(|(_, &selected)| selected)
            .map(|(port, _)| port.clone())
            .collect()
    }

    pub fn set_loaded(&mut self, encoding: Option<TextEncoding>, row_count: usize) {
        self.encoding = encoding;
        self.row_count = row_count;
    }

    pub fn clear(&mut self) {
        self.ports.clear();
        self.selected_ports.clear();
        self.encoding = None;
        self.row_count = 0;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("⚓ BUSAN PORT")
                    .size(22.0)
                    .color(Color32::from_rgb(0, 78, 146)),
            );
            ui.label(RichText::new("DATA INSIGHT").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let file_name = self
                    .data_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "No file selected".to_string());
                ui.label(RichText::new(file_name).size(12.0));

                ui.horizontal(|ui| {
                    if ui.button("📂 Browse").clicked() {
                        action = ControlPanelAction::BrowseCsv;
                    }
                    if ui.button("🔄 Reload").clicked() {
                        action = ControlPanelAction::Reload;
                    }
                });

                if let Some(encoding) = self.encoding {
                    ui.label(
                        RichText::new(format!("{} rows · {}", self.row_count, encoding))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Port Filter Section =====
        ui.label(RichText::new("🚢 비교 항구 선택").size(14.0).strong());
        ui.add_space(5.0);

        if self.ports.is_empty() {
            ui.label(RichText::new("No Data").color(Color32::GRAY));
        } else {
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(5.0)
                .show(ui, |ui| {
                    ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                        for (i, port) in self.ports.iter().enumerate() {
                            if i < self.selected_ports.len()
                                && ui.checkbox(&mut self.selected_ports[i], port).changed()
                            {
                                action = ControlPanelAction::PortSelectionChanged;
                            }
                        }
                    });
                });

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.small_button("Select All").clicked() {
                    self.selected_ports.iter_mut().for_each(|v| *v = true);
                    action = ControlPanelAction::PortSelectionChanged;
                }
                if ui.small_button("Clear All").clicked() {
                    self.selected_ports.iter_mut().for_each(|v| *v = false);
                    action = ControlPanelAction::PortSelectionChanged;
                }
            });
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Reload,
    PortSelectionChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_fill_uses_defaults() {
        let mut panel = ControlPanel::new(PathBuf::from("volumes.csv"));
        panel.update_ports(ports(&["북항", "감천항", "신항"]), &ports(&["북항", "신항"]));
        assert_eq!(panel.get_selected_ports(), ports(&["북항", "신항"]));
    }

    #[test]
    fn test_refill_keeps_selection() {
        let mut panel = ControlPanel::new(PathBuf::from("volumes.csv"));
        panel.update_ports(ports(&["북항", "감천항"]), &ports(&["북항"]));
        panel.selected_ports = vec![false, true];

        panel.update_ports(ports(&["감천항", "북항", "신항"]), &ports(&["북항"]));
        assert_eq!(panel.get_selected_ports(), ports(&["감천항"]));
    }

    #[test]
    fn test_clear_resets_to_first_fill() {
        let mut panel = ControlPanel::new(PathBuf::from("volumes.csv"));
        panel.update_ports(ports(&["북항"]), &[]);
        panel.clear();
        panel.update_ports(ports(&["북항"]), &ports(&["북항"]));
        assert_eq!(panel.get_selected_ports(), ports(&["북항"]));
    }
}
