//! Metric Cards
//! The four headline cards above the tabs.

use crate::charts::ACCENT_COLOR;
use crate::stats::CargoSummary;
use egui::{Color32, RichText, Stroke};

const UP_COLOR: Color32 = Color32::from_rgb(209, 18, 18);
const DOWN_COLOR: Color32 = Color32::from_rgb(18, 91, 209);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Up,
    Down,
    Neutral,
}

impl Tone {
    fn color(self) -> Color32 {
        match self {
            Tone::Up => UP_COLOR,
            Tone::Down => DOWN_COLOR,
            Tone::Neutral => Color32::GRAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub caption: String,
    pub tone: Tone,
}

/// Group the integer digits in threes: `1300000.5` -> `1,300,000.5`.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    let nonzero = formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    if value < 0.0 && nonzero {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Card contents for a summary.
pub fn metric_cards(summary: &CargoSummary) -> [MetricCard; 4] {
    let (arrow, tone) = if summary.delta >= 0.0 {
        ("▲", Tone::Up)
    } else {
        ("▼", Tone::Down)
    };

    [
        MetricCard {
            label: "전체 물동량 (만 톤)".to_string(),
            value: format_thousands(summary.total, 0),
            caption: format!("{} {}", arrow, format_thousands(summary.delta.abs(), 1)),
            tone,
        },
        MetricCard {
            label: "전년 대비 성장률".to_string(),
            value: format!("{:.1}%", summary.growth_rate),
            caption: "Annual Growth".to_string(),
            tone: Tone::Neutral,
        },
        MetricCard {
            label: "최대 실적 거점".to_string(),
            value: summary.top_port.clone().unwrap_or_else(|| "-".to_string()),
            caption: "Top Performing Port".to_string(),
            tone: Tone::Neutral,
        },
        MetricCard {
            label: "분석 기준 연도".to_string(),
            value: summary.latest_year.to_string(),
            caption: "Data Updated".to_string(),
            tone: Tone::Neutral,
        },
    ]
}

/// Draw the cards side by side.
pub fn draw_metric_cards(ui: &mut egui::Ui, summary: &CargoSummary) {
    let cards = metric_cards(summary);

    ui.columns(cards.len(), |columns| {
        for (ui, card) in columns.iter_mut().zip(cards.iter()) {
            egui::Frame::none()
                .rounding(12.0)
                .stroke(Stroke::new(1.0, Color32::from_gray(220)))
                .fill(ui.visuals().extreme_bg_color)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(&card.label).size(13.0).color(Color32::GRAY));
                    ui.add_space(6.0);
                    ui.label(RichText::new(&card.value).size(28.0).strong().color(ACCENT_COLOR));
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(&card.caption)
                            .size(13.0)
                            .strong()
                            .color(card.tone.color()),
                    );
                });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(delta: f64) -> CargoSummary {
        CargoSummary {
            latest_year: 2023,
            total: 130.0 + delta - 20.0,
            previous_total: 110.0,
            delta,
            growth_rate: delta / 110.0 * 100.0,
            top_port: Some("신항".to_string()),
            breakdown: Vec::new(),
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(1_300_000.0, 0), "1,300,000");
        assert_eq!(format_thousands(130.0, 0), "130");
        assert_eq!(format_thousands(12_345.678, 1), "12,345.7");
        assert_eq!(format_thousands(-1_234.0, 0), "-1,234");
        assert_eq!(format_thousands(-0.01, 1), "0.0");
        assert_eq!(format_thousands(999.0, 0), "999");
    }

    #[test]
    fn test_cards_growth() {
        let cards = metric_cards(&summary(20.0));
        assert_eq!(cards[0].value, "130");
        assert_eq!(cards[0].caption, "▲ 20.0");
        assert_eq!(cards[0].tone, Tone::Up);
        assert_eq!(cards[1].value, "18.2%");
        assert_eq!(cards[2].value, "신항");
        assert_eq!(cards[3].value, "2023");
    }

    #[test]
    fn test_cards_decline() {
        let cards = metric_cards(&summary(-5.5));
        assert_eq!(cards[0].caption, "▼ 5.5");
        assert_eq!(cards[0].tone, Tone::Down);
    }
}
