//! Chart Plotter Module
//! Draws the dashboard charts with egui_plot.

use crate::stats::{CategoryShare, PortSeries, PortShare, YearTotal};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

/// Headline accent (Busan Port blue)
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(0, 78, 146);
/// Near-black used for the trend line
pub const INK_COLOR: Color32 = Color32::from_rgb(26, 26, 26);

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const CHART_HEIGHT: f32 = 360.0;

/// Creates the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the n-th port in a chart.
    pub fn port_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Grey shade for the n-th of `count` slices, darkest first.
    pub fn grey_shade(index: usize, count: usize) -> Color32 {
        let span = count.max(2) - 1;
        let level = 40 + (index.min(span) * 170 / span) as u8;
        Color32::from_gray(level)
    }

    fn label_for(labels: &[String], value: f64) -> String {
        let idx = value.round();
        if idx < 0.0 || (value - idx).abs() > 1e-6 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }

    /// Area chart of the total volume per year.
    pub fn draw_yearly_trend(ui: &mut egui::Ui, totals: &[YearTotal]) {
        if totals.is_empty() {
            ui.label(RichText::new("No Data").color(Color32::GRAY));
            return;
        }

        let points: Vec<[f64; 2]> = totals.iter().map(|t| [t.year as f64, t.total]).collect();

        Plot::new("yearly_trend")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("년도")
            .y_axis_label("만 톤")
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract().abs() < 1e-6 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .color(INK_COLOR)
                        .fill(0.0_f32)
                        .width(2.0)
                        .name("총계_만톤"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(3.0)
                        .color(INK_COLOR),
                );
            });
    }

    /// Bars of each port's share in the latest year, labelled with percentages.
    pub fn draw_port_shares(ui: &mut egui::Ui, shares: &[PortShare]) {
        if shares.is_empty() {
            ui.label(RichText::new("No Data").color(Color32::GRAY));
            return;
        }

        let labels: Vec<String> = shares.iter().map(|s| s.port.clone()).collect();
        let bars: Vec<Bar> = shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                Bar::new(i as f64, share.total)
                    .name(format!("{} {:.1}%", share.port, share.percent))
                    .fill(Self::grey_shade(i, shares.len()))
                    .width(0.6)
            })
            .collect();

        Plot::new("port_shares")
            .height(CHART_HEIGHT - 60.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .y_axis_label("만 톤")
            .x_axis_formatter(move |mark, _range| Self::label_for(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("항구별 점유율"));
            });

        ui.horizontal_wrapped(|ui| {
            for (i, share) in shares.iter().enumerate() {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 2.0, Self::grey_shade(i, shares.len()));
                ui.label(RichText::new(format!("{} {:.1}%", share.port, share.percent)).size(13.0));
                ui.add_space(10.0);
            }
        });
    }

    /// One line per selected port over the years.
    pub fn draw_port_history(ui: &mut egui::Ui, history: &[PortSeries]) {
        if history.is_empty() {
            ui.label(RichText::new("비교할 항구를 선택하세요").color(Color32::GRAY));
            return;
        }

        Plot::new("port_history")
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label("년도")
            .y_axis_label("만 톤")
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract().abs() < 1e-6 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, series) in history.iter().enumerate() {
                    let color = Self::port_color(i);
                    let points: Vec<[f64; 2]> = series
                        .points
                        .iter()
                        .map(|p| [p.year as f64, p.total])
                        .collect();

                    plot_ui.line(
                        Line::new(PlotPoints::from(points.clone()))
                            .color(color)
                            .width(2.0)
                            .name(&series.port),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from(points))
                            .radius(3.5)
                            .color(color)
                            .name(&series.port),
                    );
                }
            });
    }

    /// Horizontal bars of the cargo categories, in the given (ascending) order.
    pub fn draw_category_breakdown(ui: &mut egui::Ui, breakdown: &[CategoryShare]) {
        if breakdown.is_empty() {
            ui.label(RichText::new("No Data").color(Color32::GRAY));
            return;
        }

        let labels: Vec<String> = breakdown.iter().map(|c| c.label.clone()).collect();
        let bars: Vec<Bar> = breakdown
            .iter()
            .enumerate()
            .map(|(i, category)| {
                Bar::new(i as f64, category.value)
                    .name(&category.label)
                    .fill(Self::grey_shade(breakdown.len() - 1 - i, breakdown.len()))
                    .width(0.6)
            })
            .collect();

        Plot::new("category_breakdown")
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("만 톤")
            .y_axis_formatter(move |mark, _range| Self::label_for(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name("화물 유형"));
            });
    }
}
