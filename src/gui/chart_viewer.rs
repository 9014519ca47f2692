//! Chart Viewer Widget
//! Central scrollable panel: header, metric cards, analysis tabs and the data table.

use super::metric_cards::draw_metric_cards;
use crate::charts::{ChartPlotter, ACCENT_COLOR};
use crate::stats::{DashboardSnapshot, TableView};
use egui::{Color32, RichText, ScrollArea};

const TABLE_MAX_HEIGHT: f32 = 420.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Trend,
    Ports,
    Composition,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 3] =
        [DashboardTab::Trend, DashboardTab::Ports, DashboardTab::Composition];

    pub fn title(self) -> &'static str {
        match self {
            DashboardTab::Trend => "📊 연도별 추이 분석",
            DashboardTab::Ports => "🚢 항구별 비교 분석",
            DashboardTab::Composition => "📦 화물 세부 구성",
        }
    }
}

/// Scrollable dashboard body.
#[derive(Default)]
pub struct ChartViewer {
    pub tab: DashboardTab,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the dashboard for a snapshot
    pub fn show(&mut self, ui: &mut egui::Ui, snapshot: &DashboardSnapshot) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_header(ui);
                ui.add_space(20.0);

                draw_metric_cards(ui, &snapshot.summary);
                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    for tab in DashboardTab::ALL {
                        ui.selectable_value(&mut self.tab, tab, RichText::new(tab.title()).size(15.0));
                    }
                });
                ui.add_space(10.0);

                match self.tab {
                    DashboardTab::Trend => {
                        ui.label(RichText::new("연도별 물동량 변화 흐름").size(18.0).strong());
                        ChartPlotter::draw_yearly_trend(ui, &snapshot.yearly_totals);
                    }
                    DashboardTab::Ports => {
                        ui.columns(2, |columns| {
                            columns[0].label(
                                RichText::new(format!(
                                    "항구별 점유율 ({})",
                                    snapshot.summary.latest_year
                                ))
                                .size(18.0)
                                .strong(),
                            );
                            ChartPlotter::draw_port_shares(&mut columns[0], &snapshot.port_shares);

                            columns[1].label(RichText::new("항구별 성장 역사 비교").size(18.0).strong());
                            ChartPlotter::draw_port_history(&mut columns[1], &snapshot.port_history);
                        });
                    }
                    DashboardTab::Composition => {
                        ui.label(RichText::new("화물 유형별 상세 분포").size(18.0).strong());
                        ChartPlotter::draw_category_breakdown(ui, &snapshot.summary.breakdown);
                    }
                }

                ui.add_space(20.0);
                egui::CollapsingHeader::new("📝 전체 데이터 테이블 확인하기")
                    .default_open(false)
                    .show(ui, |ui| {
                        Self::draw_records_table(ui, &snapshot.table);
                    });
            });
    }

    fn draw_header(ui: &mut egui::Ui) {
        ui.add_space(20.0);
        ui.label(
            RichText::new("BUSAN PORT DATA INSIGHT")
                .size(16.0)
                .color(Color32::GRAY),
        );
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.label(RichText::new("부산항 연도별 ").size(34.0).strong());
            ui.label(RichText::new("물동량").size(34.0).strong().color(ACCENT_COLOR));
            ui.label(RichText::new(" 대시보드 ⚓").size(34.0).strong());
        });
    }

    fn draw_records_table(ui: &mut egui::Ui, table: &TableView) {
        ScrollArea::both()
            .max_height(TABLE_MAX_HEIGHT)
            .id_salt("records_table")
            .show(ui, |ui| {
                egui::Grid::new("records_grid")
                    .striped(true)
                    .num_columns(table.columns.len())
                    .show(ui, |ui| {
                        for name in &table.columns {
                            ui.label(RichText::new(name).strong());
                        }
                        ui.end_row();

                        for row in &table.rows {
                            for cell in row {
                                ui.label(cell);
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
