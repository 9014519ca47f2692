//! Dashboard Snapshot
//! Everything the dashboard renders, computed in one pass from the loaded table.

use super::summary::{
    CargoSummary, PortSeries, PortShare, SummaryError, TableView, VolumeSummarizer, YearTotal,
};
use crate::data::{PortRecord, PortTable, TextEncoding};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// File the table was read from, `None` for in-memory tables
    pub source: Option<PathBuf>,
    pub encoding: Option<TextEncoding>,
    pub summary: CargoSummary,
    /// Trend tab
    pub yearly_totals: Vec<YearTotal>,
    /// Share of each port in the latest year
    pub port_shares: Vec<PortShare>,
    /// Every port in the table, first-appearance order
    pub ports: Vec<String>,
    pub selected_ports: Vec<String>,
    pub port_history: Vec<PortSeries>,
    /// Full table, newest year first
    pub records: Vec<PortRecord>,
    /// Same rows as display text with every column of the frame
    #[serde(skip)]
    pub table: TableView,
}

impl DashboardSnapshot {
    /// Build the snapshot for the given port selection.
    ///
    /// Selected ports that do not occur in the table are dropped.
    pub fn build(table: &PortTable, selected_ports: &[String]) -> Result<Self, SummaryError> {
        let summary = VolumeSummarizer::summarize(table)?;
        let latest = VolumeSummarizer::rows_for_year(table, summary.latest_year)?;
        let ports = table.ports()?;

        let selected_ports: Vec<String> = selected_ports
            .iter()
            .filter(|port| ports.contains(port))
            .cloned()
            .collect();

        Ok(Self {
            yearly_totals: VolumeSummarizer::yearly_totals(table)?,
            port_shares: VolumeSummarizer::port_shares(&latest)?,
            port_history: VolumeSummarizer::port_history(table, &selected_ports)?,
            records: VolumeSummarizer::records_newest_first(table)?,
            table: VolumeSummarizer::table_newest_first(table)?,
            source: table.source().map(|p| p.to_path_buf()),
            encoding: table.encoding(),
            summary,
            ports,
            selected_ports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_build_filters_unknown_ports() {
        let df = polars::df!(
            "년도" => [2022i64, 2023, 2023],
            "항구분" => ["북항", "북항", "감천항"],
            "총계" => [10_000i64, 20_000, 30_000],
        )
        .unwrap();
        let table = PortTable::from_frame(df).unwrap();

        let snapshot =
            DashboardSnapshot::build(&table, &["북항".to_string(), "신항".to_string()]).unwrap();

        assert_eq!(snapshot.selected_ports, vec!["북항"]);
        assert_eq!(snapshot.port_history.len(), 1);
        assert_eq!(snapshot.ports, vec!["북항", "감천항"]);
        assert_eq!(snapshot.summary.top_port.as_deref(), Some("감천항"));
        assert_eq!(snapshot.records[0].year, 2023);
        assert_eq!(snapshot.port_shares.len(), 2);
        assert_eq!(snapshot.table.rows.len(), 3);
        assert!(snapshot.table.columns.contains(&"총계_만톤".to_string()));
        assert_eq!(snapshot.source, None);
    }
}
