//! Busan Port Dashboard - annual cargo volume statistics
//!
//! Loads the Busan Port Authority volume CSV (with text encoding fallback),
//! derives 10,000-ton columns and computes the dashboard summaries.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;

use data::LoadCache;
use stats::{DashboardSnapshot, SummaryError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("데이터 파일을 로드할 수 없습니다. 파일명과 경로를 확인해 주세요. ({})", .0.display())]
    NoData(PathBuf),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Load `path` through the cache and compute everything the dashboard shows.
pub fn build_snapshot(
    cache: &mut LoadCache,
    path: &Path,
    selected_ports: &[String],
) -> Result<DashboardSnapshot, DashboardError> {
    let table = cache
        .get_or_load(path)
        .ok_or_else(|| DashboardError::NoData(path.to_path_buf()))?;
    Ok(DashboardSnapshot::build(&table, selected_ports)?)
}
