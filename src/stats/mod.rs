//! Stats module - Volume summaries for the dashboard

mod snapshot;
mod summary;

pub use snapshot::DashboardSnapshot;
pub use summary::{
    CargoSummary, CategoryShare, PortSeries, PortShare, SummaryError, TableView, VolumeSummarizer,
    YearTotal,
};
