//! Volume Summary Module
//! Latest-year totals, growth, top port and cargo composition.

use crate::data::{
    float_values, int_values, records_of, string_values, PortRecord, PortTable, VolumeField,
    PORT_COL, YEAR_COL,
};
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Table has no year values")]
    EmptyTable,
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Headline figures for one year. Volumes are in 10,000-ton units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoSummary {
    pub latest_year: i64,
    pub total: f64,
    pub previous_total: f64,
    pub delta: f64,
    /// Percent change against the previous year; 0 when that year is empty
    pub growth_rate: f64,
    pub top_port: Option<String>,
    /// Ascending by value
    pub breakdown: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub field: VolumeField,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearTotal {
    pub year: i64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortShare {
    pub port: String,
    pub total: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortSeries {
    pub port: String,
    pub points: Vec<YearTotal>,
}

/// The whole frame as display text: every column, derived ones included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub columns: Vec<String>,
    /// Row-major; empty cells are empty strings
    pub rows: Vec<Vec<String>>,
}

fn require(df: &DataFrame, name: &str) -> Result<(), SummaryError> {
    if df.column(name).is_ok() {
        Ok(())
    } else {
        Err(SummaryError::MissingColumn(name.to_string()))
    }
}

fn total_column() -> String {
    VolumeField::Total.derived_column()
}

/// Sum of a derived column, nulls ignored. Absent column sums to `None`.
fn column_sum(df: &DataFrame, name: &str) -> Result<Option<f64>, SummaryError> {
    if df.column(name).is_err() {
        return Ok(None);
    }
    let values = float_values(df, name)?;
    Ok(Some(values.into_iter().flatten().fold(0.0, |acc, v| acc + v)))
}

/// Handles summary computations over a loaded table.
pub struct VolumeSummarizer;

impl VolumeSummarizer {
    /// Maximum year present, `None` for an empty table.
    pub fn latest_year(table: &PortTable) -> Result<Option<i64>, SummaryError> {
        require(table.frame(), YEAR_COL)?;
        let years = int_values(table.frame(), YEAR_COL)?;
        Ok(years.into_iter().flatten().max())
    }

    /// Rows whose year equals `year`.
    pub fn rows_for_year(table: &PortTable, year: i64) -> Result<DataFrame, SummaryError> {
        require(table.frame(), YEAR_COL)?;
        let subset = table
            .frame()
            .clone()
            .lazy()
            .filter(col(YEAR_COL).cast(DataType::Int64).eq(lit(year)))
            .collect()?;
        Ok(subset)
    }

    /// Sum of `총계_만톤` over the rows of `year`; 0 when no rows match.
    pub fn total_for_year(table: &PortTable, year: i64) -> Result<f64, SummaryError> {
        require(table.frame(), &total_column())?;
        let subset = Self::rows_for_year(table, year)?;
        Ok(column_sum(&subset, &total_column())?.unwrap_or(0.0))
    }

    /// (current - previous) / previous * 100, or 0 when previous is 0.
    pub fn growth_rate(current: f64, previous: f64) -> f64 {
        if previous == 0.0 {
            0.0
        } else {
            (current - previous) / previous * 100.0
        }
    }

    /// Port with the largest total in `subset`. Ties go to the earliest row.
    pub fn top_port(subset: &DataFrame) -> Result<Option<String>, SummaryError> {
        require(subset, PORT_COL)?;
        require(subset, &total_column())?;

        let ports = string_values(subset, PORT_COL)?;
        let totals = float_values(subset, &total_column())?;

        let mut best: Option<(f64, String)> = None;
        for (port, total) in ports.into_iter().zip(totals) {
            let (Some(port), Some(total)) = (port, total) else {
                continue;
            };
            if total.is_nan() {
                continue;
            }
            match &best {
                Some((best_total, _)) if total <= *best_total => {}
                _ => best = Some((total, port)),
            }
        }

        Ok(best.map(|(_, port)| port))
    }

    /// Per-category sums over `subset`, ascending by value.
    /// Categories whose column is absent are left out.
    pub fn category_breakdown(subset: &DataFrame) -> Result<Vec<CategoryShare>, SummaryError> {
        let mut shares = Vec::with_capacity(VolumeField::CATEGORIES.len());
        for field in VolumeField::CATEGORIES {
            if let Some(value) = column_sum(subset, &field.derived_column())? {
                shares.push(CategoryShare {
                    field,
                    label: field.label().to_string(),
                    value,
                });
            }
        }

        shares.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));
        Ok(shares)
    }

    /// All headline figures for `year`.
    pub fn summarize_year(table: &PortTable, year: i64) -> Result<CargoSummary, SummaryError> {
        let subset = Self::rows_for_year(table, year)?;
        let total = Self::total_for_year(table, year)?;
        let previous_total = Self::total_for_year(table, year - 1)?;

        Ok(CargoSummary {
            latest_year: year,
            total,
            previous_total,
            delta: total - previous_total,
            growth_rate: Self::growth_rate(total, previous_total),
            top_port: Self::top_port(&subset)?,
            breakdown: Self::category_breakdown(&subset)?,
        })
    }

    /// Summary for the latest year in the table.
    pub fn summarize(table: &PortTable) -> Result<CargoSummary, SummaryError> {
        let year = Self::latest_year(table)?.ok_or(SummaryError::EmptyTable)?;
        Self::summarize_year(table, year)
    }

    /// Total per year, ascending by year.
    pub fn yearly_totals(table: &PortTable) -> Result<Vec<YearTotal>, SummaryError> {
        require(table.frame(), YEAR_COL)?;
        require(table.frame(), &total_column())?;

        let years = int_values(table.frame(), YEAR_COL)?;
        let totals = float_values(table.frame(), &total_column())?;

        let mut by_year: BTreeMap<i64, f64> = BTreeMap::new();
        for (year, total) in years.into_iter().zip(totals) {
            if let Some(year) = year {
                *by_year.entry(year).or_default() += total.unwrap_or(0.0);
            }
        }

        Ok(by_year
            .into_iter()
            .map(|(year, total)| YearTotal { year, total })
            .collect())
    }

    /// Each port's total and percent of the `subset` total, in first-appearance order.
    pub fn port_shares(subset: &DataFrame) -> Result<Vec<PortShare>, SummaryError> {
        require(subset, PORT_COL)?;
        require(subset, &total_column())?;

        let ports = string_values(subset, PORT_COL)?;
        let totals = float_values(subset, &total_column())?;

        let mut shares: Vec<PortShare> = Vec::new();
        for (port, total) in ports.into_iter().zip(totals) {
            let Some(port) = port else { continue };
            let total = total.unwrap_or(0.0);
            match shares.iter_mut().find(|s| s.port == port) {
                Some(share) => share.total += total,
                None => shares.push(PortShare {
                    port,
                    total,
                    percent: 0.0,
                }),
            }
        }

        let sum: f64 = shares.iter().map(|s| s.total).sum();
        if sum != 0.0 {
            for share in &mut shares {
                share.percent = share.total / sum * 100.0;
            }
        }

        Ok(shares)
    }

    /// Yearly totals of each requested port, in request order.
    pub fn port_history(table: &PortTable, ports: &[String]) -> Result<Vec<PortSeries>, SummaryError> {
        let records = records_of(table.frame())?;

        Ok(ports
            .iter()
            .map(|port| {
                let mut by_year: BTreeMap<i64, f64> = BTreeMap::new();
                for record in records.iter().filter(|r| &r.port == port) {
                    *by_year.entry(record.year).or_default() +=
                        record.volume_in_units(VolumeField::Total).unwrap_or(0.0);
                }
                PortSeries {
                    port: port.clone(),
                    points: by_year
                        .into_iter()
                        .map(|(year, total)| YearTotal { year, total })
                        .collect(),
                }
            })
            .collect())
    }

    /// Every row, newest year first. Rows of the same year keep file order.
    pub fn records_newest_first(table: &PortTable) -> Result<Vec<PortRecord>, SummaryError> {
        let mut records = table.records()?;
        records.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(records)
    }

    /// Every row and column as text, newest year first, stable within a year.
    pub fn table_newest_first(table: &PortTable) -> Result<TableView, SummaryError> {
        require(table.frame(), YEAR_COL)?;
        let sorted = table
            .frame()
            .clone()
            .lazy()
            .sort_by_exprs(
                [col(YEAR_COL).cast(DataType::Int64)],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .collect()?;

        let columns = table.column_names();
        let mut rows = vec![Vec::with_capacity(columns.len()); sorted.height()];
        for name in &columns {
            for (row, cell) in rows.iter_mut().zip(string_values(&sorted, name)?) {
                row.push(cell.unwrap_or_default());
            }
        }

        Ok(TableView { columns, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_table() -> PortTable {
        let df = polars::df!(
            "년도" => [2023i64, 2023, 2022, 2022],
            "항구분" => ["북항", "신항", "북항", "신항"],
            "총계" => [500_000i64, 800_000, 400_000, 700_000],
            "외항입항" => [100_000i64, 200_000, 100_000, 150_000],
            "외항출항" => [150_000i64, 250_000, 100_000, 150_000],
            "외항입항환적" => [60_000i64, 150_000, 50_000, 150_000],
            "외항출항환적" => [60_000i64, 150_000, 50_000, 150_000],
            "내항연안화물" => [130_000i64, 50_000, 100_000, 100_000],
        )
        .unwrap();
        PortTable::from_frame(df).unwrap()
    }

    #[test]
    fn test_latest_year_and_totals() {
        let table = example_table();
        assert_eq!(VolumeSummarizer::latest_year(&table).unwrap(), Some(2023));
        assert!((VolumeSummarizer::total_for_year(&table, 2023).unwrap() - 130.0).abs() < 1e-9);
        assert!((VolumeSummarizer::total_for_year(&table, 2022).unwrap() - 110.0).abs() < 1e-9);
        assert_eq!(VolumeSummarizer::total_for_year(&table, 1999).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_year_serializes_as_positive_zero() {
        let table = example_table();
        let total = VolumeSummarizer::total_for_year(&table, 1999).unwrap();
        assert!(total.is_sign_positive());
        assert_eq!(serde_json::to_string(&total).unwrap(), "0.0");
    }

    #[test]
    fn test_summary_example() {
        let summary = VolumeSummarizer::summarize(&example_table()).unwrap();
        assert_eq!(summary.latest_year, 2023);
        assert!((summary.total - 130.0).abs() < 1e-9);
        assert!((summary.previous_total - 110.0).abs() < 1e-9);
        assert!((summary.delta - 20.0).abs() < 1e-9);
        assert!((summary.growth_rate - (130.0 - 110.0) / 110.0 * 100.0).abs() < 1e-9);
        assert_eq!(summary.top_port.as_deref(), Some("신항"));
    }

    #[test]
    fn test_growth_rate_guards_zero() {
        assert_eq!(VolumeSummarizer::growth_rate(130.0, 0.0), 0.0);
        assert!((VolumeSummarizer::growth_rate(150.0, 100.0) - 50.0).abs() < 1e-12);
        assert!((VolumeSummarizer::growth_rate(50.0, 100.0) + 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_year_has_zero_growth() {
        let table = example_table();
        let summary = VolumeSummarizer::summarize_year(&table, 2022).unwrap();
        assert_eq!(summary.previous_total, 0.0);
        assert!(summary.previous_total.is_sign_positive());
        assert_eq!(summary.growth_rate, 0.0);
    }

    #[test]
    fn test_top_port_tie_goes_to_first_row() {
        let df = polars::df!(
            "년도" => [2023i64, 2023, 2023],
            "항구분" => ["감천항", "신항", "북항"],
            "총계" => [100i64, 900, 900],
        )
        .unwrap();
        let table = PortTable::from_frame(df).unwrap();
        let subset = VolumeSummarizer::rows_for_year(&table, 2023).unwrap();
        assert_eq!(VolumeSummarizer::top_port(&subset).unwrap().as_deref(), Some("신항"));
    }

    #[test]
    fn test_breakdown_sorted_and_sums_to_total() {
        let table = example_table();
        let subset = VolumeSummarizer::rows_for_year(&table, 2023).unwrap();
        let breakdown = VolumeSummarizer::category_breakdown(&subset).unwrap();

        assert_eq!(breakdown.len(), 5);
        assert!(breakdown.windows(2).all(|w| w[0].value <= w[1].value));

        let sum: f64 = breakdown.iter().map(|c| c.value).sum();
        let total = VolumeSummarizer::total_for_year(&table, 2023).unwrap();
        assert!((sum - total).abs() < 1e-9);
        assert_eq!(breakdown[0].field, VolumeField::Coastal);
    }

    #[test]
    fn test_breakdown_skips_absent_categories() {
        let df = polars::df!(
            "년도" => [2023i64],
            "항구분" => ["북항"],
            "총계" => [10_000i64],
            "외항입항" => [10_000i64],
        )
        .unwrap();
        let table = PortTable::from_frame(df).unwrap();
        let subset = VolumeSummarizer::rows_for_year(&table, 2023).unwrap();
        let breakdown = VolumeSummarizer::category_breakdown(&subset).unwrap();
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].label, "외항 입항");
        assert_eq!(breakdown[0].value, 1.0);
    }

    #[test]
    fn test_summaries_do_not_mutate_table() {
        let table = example_table();
        let before = table.frame().clone();
        let _ = VolumeSummarizer::summarize(&table).unwrap();
        let _ = VolumeSummarizer::yearly_totals(&table).unwrap();
        assert!(table.frame().equals_missing(&before));
    }

    #[test]
    fn test_yearly_totals_ascending() {
        let totals = VolumeSummarizer::yearly_totals(&example_table()).unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].year, 2022);
        assert!((totals[0].total - 110.0).abs() < 1e-9);
        assert!((totals[1].total - 130.0).abs() < 1e-9);
    }

    #[test]
    fn test_port_shares_percent() {
        let table = example_table();
        let subset = VolumeSummarizer::rows_for_year(&table, 2023).unwrap();
        let shares = VolumeSummarizer::port_shares(&subset).unwrap();
        assert_eq!(shares[0].port, "북항");
        assert!((shares[0].percent - 500.0 / 13.0).abs() < 1e-9);
        let percent: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_port_history_keeps_request_order() {
        let table = example_table();
        let history =
            VolumeSummarizer::port_history(&table, &["신항".to_string(), "없는항".to_string()]).unwrap();
        assert_eq!(history[0].port, "신항");
        assert_eq!(
            history[0].points,
            vec![YearTotal { year: 2022, total: 70.0 }, YearTotal { year: 2023, total: 80.0 }]
        );
        assert!(history[1].points.is_empty());
    }

    #[test]
    fn test_records_newest_first() {
        let records = VolumeSummarizer::records_newest_first(&example_table()).unwrap();
        let order: Vec<(i64, &str)> = records.iter().map(|r| (r.year, r.port.as_str())).collect();
        assert_eq!(order, vec![(2023, "북항"), (2023, "신항"), (2022, "북항"), (2022, "신항")]);
    }

    #[test]
    fn test_table_view_includes_derived_columns() {
        let view = VolumeSummarizer::table_newest_first(&example_table()).unwrap();
        assert_eq!(view.columns.len(), 2 + 6 + 6);
        assert!(view.columns.contains(&"총계_만톤".to_string()));
        assert_eq!(view.rows.len(), 4);

        let year = view.columns.iter().position(|c| c == "년도").unwrap();
        let port = view.columns.iter().position(|c| c == "항구분").unwrap();
        let derived = view.columns.iter().position(|c| c == "총계_만톤").unwrap();
        let order: Vec<(&str, &str)> = view
            .rows
            .iter()
            .map(|r| (r[year].as_str(), r[port].as_str()))
            .collect();
        assert_eq!(order, vec![("2023", "북항"), ("2023", "신항"), ("2022", "북항"), ("2022", "신항")]);
        assert_eq!(view.rows[1][derived].parse::<f64>().unwrap(), 80.0);
    }

    #[test]
    fn test_missing_total_column() {
        let df = polars::df!("년도" => [2023i64], "항구분" => ["북항"]).unwrap();
        let table = PortTable::from_frame(df).unwrap();
        assert!(matches!(
            VolumeSummarizer::summarize(&table),
            Err(SummaryError::MissingColumn(name)) if name == "총계_만톤"
        ));
    }

    #[test]
    fn test_empty_table() {
        let df = polars::df!(
            "년도" => Vec::<i64>::new(),
            "항구분" => Vec::<String>::new(),
            "총계" => Vec::<i64>::new(),
        )
        .unwrap();
        let table = PortTable::from_frame(df).unwrap();
        assert!(matches!(VolumeSummarizer::summarize(&table), Err(SummaryError::EmptyTable)));
    }
}
