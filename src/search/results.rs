//! JSON export of a finished search

use std::fs;
use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::config::SearchConfig;

use super::cursor::RegionBounds;
use super::driver::{SearchError, SearchSummary};
use super::report::FoundMatch;

#[derive(Serialize)]
struct ResultsFile<'a> {
    generated: String,
    config: &'a SearchConfig,
    bounds: RegionBounds,
    regions_total: u64,
    regions_processed: u64,
    elapsed_secs: f64,
    matches: &'a [FoundMatch],
}

/// Serialize a finished run to pretty JSON.
pub fn results_json(config: &SearchConfig, summary: &SearchSummary) -> Result<String, SearchError> {
    let file = ResultsFile {
        generated: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        config,
        bounds: summary.bounds,
        regions_total: summary.regions_total(),
        regions_processed: summary.regions_processed,
        elapsed_secs: summary.elapsed.as_secs_f64(),
        matches: &summary.matches,
    };
    serde_json::to_string_pretty(&file).map_err(|e| SearchError::Serialization(e.to_string()))
}

/// Write the run's config, bounds and matches to `path`.
pub fn write_results(
    path: &Path,
    config: &SearchConfig,
    summary: &SearchSummary,
) -> Result<(), SearchError> {
    fs::write(path, results_json(config, summary)?)?;
    Ok(())
}
