//! Port Table Module
//! Loaded volume table and its typed row view.

use super::encoding::TextEncoding;
use super::schema::{VolumeField, PORT_COL, TONS_PER_UNIT, YEAR_COL};
use polars::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One row of the volume file: a (year, port) pair and its volumes in tons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortRecord {
    pub year: i64,
    pub port: String,
    /// Indexed by `VolumeField::index()`; `None` when the column is absent or the cell is empty
    pub volumes: [Option<f64>; 7],
}

impl PortRecord {
    pub fn volume(&self, field: VolumeField) -> Option<f64> {
        self.volumes[field.index()]
    }

    /// Volume in 10,000-ton units.
    pub fn volume_in_units(&self, field: VolumeField) -> Option<f64> {
        self.volume(field).map(|v| v / TONS_PER_UNIT)
    }
}

/// The loaded table: normalized headers plus derived `_만톤` columns.
///
/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PortTable {
    frame: DataFrame,
    encoding: Option<TextEncoding>,
    source: Option<PathBuf>,
}

impl PortTable {
    pub(crate) fn new(frame: DataFrame, encoding: TextEncoding, source: &Path) -> Self {
        Self {
            frame,
            encoding: Some(encoding),
            source: Some(source.to_path_buf()),
        }
    }

    /// Wrap an in-memory frame, normalizing headers and deriving unit columns.
    pub fn from_frame(frame: DataFrame) -> PolarsResult<Self> {
        let frame = super::loader::derive_unit_columns(super::loader::normalize_headers(frame)?)?;
        Ok(Self {
            frame,
            encoding: None,
            source: None,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Encoding the file was decoded with.
    pub fn encoding(&self) -> Option<TextEncoding> {
        self.encoding
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    /// Distinct port names in order of first appearance.
    pub fn ports(&self) -> PolarsResult<Vec<String>> {
        let mut ports: Vec<String> = Vec::new();
        for port in string_values(&self.frame, PORT_COL)?.into_iter().flatten() {
            if !ports.contains(&port) {
                ports.push(port);
            }
        }
        Ok(ports)
    }

    /// Typed rows in file order. Rows without a year are dropped.
    pub fn records(&self) -> PolarsResult<Vec<PortRecord>> {
        records_of(&self.frame)
    }
}

/// Typed rows of any frame with the volume schema (the full table or a subset).
pub fn records_of(frame: &DataFrame) -> PolarsResult<Vec<PortRecord>> {
    let years = int_values(frame, YEAR_COL)?;
    let ports = string_values(frame, PORT_COL)?;

    let mut columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(VolumeField::ALL.len());
    for field in VolumeField::ALL {
        if frame.column(field.source_column()).is_ok() {
            columns.push(float_values(frame, field.source_column())?);
        } else {
            columns.push(vec![None; frame.height()]);
        }
    }

    let records = years
        .into_iter()
        .zip(ports)
        .enumerate()
        .filter_map(|(i, (year, port))| {
            let year = year?;
            let mut volumes = [None; 7];
            for (slot, column) in volumes.iter_mut().zip(&columns) {
                *slot = column[i];
            }
            Some(PortRecord {
                year,
                port: port.unwrap_or_default(),
                volumes,
            })
        })
        .collect();

    Ok(records)
}

/// Column cast to f64; unparseable cells become `None`.
pub(crate) fn float_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let values = column.f64()?.into_iter().collect();
    Ok(values)
}

pub(crate) fn int_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let column = df.column(name)?.cast(&DataType::Int64)?;
    let values = column.as_materialized_series().i64()?.into_iter().collect();
    Ok(values)
}

pub(crate) fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_string()))
        .collect();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        polars::df!(
            " 년도 " => [2022i64, 2023, 2023],
            "항구분" => ["북항", "북항", "신항"],
            "총계" => [400_000i64, 500_000, 800_000],
        )
        .unwrap()
    }

    #[test]
    fn test_from_frame_normalizes_and_derives() {
        let table = PortTable::from_frame(sample_frame()).unwrap();
        assert!(table.has_column("년도"));
        assert!(table.has_column("총계_만톤"));
        assert!(!table.has_column("외항입항_만톤"));
        assert_eq!(table.encoding(), None);
    }

    #[test]
    fn test_ports_first_appearance_order() {
        let table = PortTable::from_frame(sample_frame()).unwrap();
        assert_eq!(table.ports().unwrap(), vec!["북항", "신항"]);
    }

    #[test]
    fn test_records_carry_volumes() {
        let table = PortTable::from_frame(sample_frame()).unwrap();
        let records = table.records().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].port, "신항");
        assert_eq!(records[2].volume(VolumeField::Total), Some(800_000.0));
        assert_eq!(records[2].volume_in_units(VolumeField::Total), Some(80.0));
        assert_eq!(records[2].volume(VolumeField::Coastal), None);
    }
}
