//! Charts module - Chart rendering

mod plotter;

pub use plotter::{ChartPlotter, ACCENT_COLOR, INK_COLOR, PALETTE};
