//! Search driver
//!
//! Turns a config into region bounds, runs a fixed pool of workers over them
//! and waits for every worker to finish.

use std::sync::atomic::Ordering;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::config::{ConfigError, SearchConfig};
use crate::generator::StructureGenerator;

use super::cursor::{RegionBounds, RegionCursor};
use super::report::{FoundMatch, MatchReporter};
use super::worker::{worker_loop, SharedSearch, WorkerStats};

/// Region rectangle covering the configured search area.
///
/// Block distances are converted with truncating division by the region
/// size in chunks and by 16 blocks per chunk, and the radius gets one extra
/// region of margin.
pub fn region_bounds(config: &SearchConfig, region_size: i32) -> Result<RegionBounds, ConfigError> {
    if region_size <= 0 {
        return Err(ConfigError::InvalidRegionSize(region_size));
    }
    let radius = config.search_radius / region_size / 16 + 1;
    let center_x = config.center_x / region_size / 16;
    let center_z = config.center_z / region_size / 16;
    Ok(RegionBounds::around(center_x, center_z, radius))
}

/// Outcome of a finished search.
#[derive(Clone, Debug)]
pub struct SearchSummary {
    pub bounds: RegionBounds,
    pub threads: usize,
    pub regions_processed: u64,
    /// Matches in the order their workers finished.
    pub matches: Vec<FoundMatch>,
    pub elapsed: Duration,
}

impl SearchSummary {
    pub fn regions_total(&self) -> u64 {
        self.bounds.region_count()
    }

    /// Print the end-of-run report.
    pub fn print(&self) {
        println!("Search finished in {:.2}s", self.elapsed.as_secs_f64());
        println!(
            "  Regions processed: {} of {}",
            self.regions_processed,
            self.regions_total()
        );
        println!("  Matches found: {}", self.matches.len());
    }
}

/// Errors that end a search run.
#[derive(Debug)]
pub enum SearchError {
    /// Invalid configuration, detected before any worker starts
    Config(ConfigError),
    /// The worker pool could not be created with the requested size
    ThreadPool(String),
    /// Writing results failed
    Io(std::io::Error),
    /// Results could not be serialized
    Serialization(String),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Config(e) => write!(f, "Configuration error: {}", e),
            SearchError::ThreadPool(e) => write!(f, "Failed to start worker threads: {}", e),
            SearchError::Io(e) => write!(f, "IO error: {}", e),
            SearchError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        SearchError::Config(e)
    }
}

impl From<std::io::Error> for SearchError {
    fn from(e: std::io::Error) -> Self {
        SearchError::Io(e)
    }
}

/// Search the configured area with `config.thread_count` workers.
///
/// Every region in the bounds is processed unless `stop_on_first` is set and
/// a match turns up. Each match goes to `reporter` as soon as it is found.
pub fn run_search(
    config: &SearchConfig,
    generator: &dyn StructureGenerator,
    reporter: &dyn MatchReporter,
) -> Result<SearchSummary, SearchError> {
    config.validate()?;
    let bounds = region_bounds(config, generator.region_size(config.version))?;

    // Build the whole pool up front; a partial pool is an error, not a slower run.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.thread_count)
        .thread_name(|i| format!("region-worker-{}", i))
        .build()
        .map_err(|e| SearchError::ThreadPool(e.to_string()))?;

    let cursor = RegionCursor::new(bounds);
    let shared = SharedSearch::new(config, generator, &cursor, reporter);
    let finished: Mutex<Vec<WorkerStats>> = Mutex::new(Vec::with_capacity(config.thread_count));

    let start = Instant::now();
    pool.scope(|scope| {
        for _ in 0..config.thread_count {
            scope.spawn(|_| {
                let stats = worker_loop(&shared);
                finished.lock().unwrap_or_else(|e| e.into_inner()).push(stats);
            });
        }
    });
    let elapsed = start.elapsed();

    let matches = finished
        .into_inner()
        .unwrap_or_else(|e| e.into_inner())
        .into_iter()
        .filter_map(|stats| stats.found)
        .collect();

    Ok(SearchSummary {
        bounds,
        threads: config.thread_count,
        regions_processed: shared.processed.load(Ordering::Relaxed),
        matches,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::LatticeGenerator;
    use crate::pieces::Piece;
    use crate::search::report::{CollectingReporter, Location};
    use crate::shapes::ShapeCategory;
    use crate::version::Version;
    use std::collections::HashSet;

    /// Places a QUAD_SQUARE plus a spare crossing in the listed regions and
    /// records every region it was asked for.
    struct Scripted {
        hits: Vec<(i32, i32)>,
        calls: Mutex<Vec<(i32, i32)>>,
    }

    impl Scripted {
        fn new(hits: Vec<(i32, i32)>) -> Self {
            Self { hits, calls: Mutex::new(Vec::new()) }
        }
    }

    impl StructureGenerator for Scripted {
        fn generate(&self, _: i64, rx: i32, rz: i32, _: i32, _: Version, pieces: &mut Vec<Piece>) {
            self.calls.lock().unwrap().push((rx, rz));
            pieces.clear();
            if self.hits.contains(&(rx, rz)) {
                let (x, z) = (rx * 432, rz * 432);
                pieces.push(Piece::crossing(x, 64, z));
                pieces.push(Piece::crossing(x + 19, 64, z));
                pieces.push(Piece::crossing(x, 64, z + 19));
                pieces.push(Piece::crossing(x + 19, 64, z + 19));
                pieces.push(Piece::crossing(x + 200, 64, z + 7));
            }
        }
    }

    fn base_config(threads: usize) -> SearchConfig {
        SearchConfig {
            version: Version::V1_16_1,
            seed: 1,
            shape: ShapeCategory::QuadSquare,
            search_radius: 2000,
            thread_count: threads,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_region_bounds_arithmetic() {
        let config = SearchConfig {
            search_radius: 10_000,
            center_x: 5000,
            center_z: -5000,
            ..base_config(1)
        };
        // 10000 / 27 / 16 = 23, 5000 / 27 / 16 = 11, -5000 / 27 / 16 = -11.
        assert_eq!(region_bounds(&config, 27).unwrap(), RegionBounds::new(-13, 35, -35, 13));

        let config = SearchConfig { search_radius: 0, center_x: -431, ..base_config(1) };
        assert_eq!(region_bounds(&config, 27).unwrap(), RegionBounds::new(-1, 1, -1, 1));

        let config = SearchConfig {
            search_radius: 256,
            center_x: 0,
            center_z: 0,
            ..base_config(1)
        };
        assert_eq!(region_bounds(&config, 16).unwrap(), RegionBounds::around(0, 0, 2));

        assert!(matches!(region_bounds(&config, 0), Err(ConfigError::InvalidRegionSize(0))));
    }

    #[test]
    fn test_every_region_generated_once() {
        for threads in [1, 3, 16] {
            let generator = Scripted::new(Vec::new());
            let reporter = CollectingReporter::new();
            let summary = run_search(&base_config(threads), &generator, &reporter).unwrap();

            let calls = generator.calls.into_inner().unwrap();
            let unique: HashSet<_> = calls.iter().copied().collect();
            assert_eq!(calls.len() as u64, summary.regions_total());
            assert_eq!(unique.len(), calls.len());
            assert_eq!(summary.regions_processed, summary.regions_total());
            assert!(summary.matches.is_empty());
        }
    }

    #[test]
    fn test_matches_do_not_cancel_other_workers() {
        let generator = Scripted::new(vec![(-4, -4), (0, 0), (4, 4)]);
        let reporter = CollectingReporter::new();
        let summary = run_search(&base_config(3), &generator, &reporter).unwrap();

        assert!(summary.matches.len() >= 2);
        let reported: Vec<Location> =
            reporter.into_matches().into_iter().map(|f| f.location).collect();
        assert!(reported.contains(&Location::new(0, 64, 0)));
        assert_eq!(reported.len(), summary.matches.len());
        assert!(reported.len() <= 3);
    }

    #[test]
    fn test_single_worker_reports_first_in_scan_order() {
        let generator = Scripted::new(vec![(2, 2), (-3, 1)]);
        let reporter = CollectingReporter::new();
        let summary = run_search(&base_config(1), &generator, &reporter).unwrap();

        assert_eq!(summary.matches.len(), 1);
        assert_eq!(summary.matches[0].location, Location::new(-3 * 432, 64, 432));
        assert!(summary.regions_processed < summary.regions_total());
    }

    #[test]
    fn test_stop_on_first() {
        let generator = Scripted::new(vec![(-6, -6)]);
        let reporter = CollectingReporter::new();
        let config = SearchConfig { stop_on_first: true, ..base_config(4) };
        let summary = run_search(&config, &generator, &reporter).unwrap();

        assert_eq!(reporter.len(), 1);
        assert!(summary.regions_processed <= summary.regions_total());
    }

    #[test]
    fn test_invalid_config_processes_nothing() {
        let generator = Scripted::new(Vec::new());
        let reporter = CollectingReporter::new();
        let config = SearchConfig { thread_count: 0, ..base_config(1) };

        let result = run_search(&config, &generator, &reporter);
        assert!(matches!(result, Err(SearchError::Config(ConfigError::OutOfRange { .. }))));
        assert!(generator.calls.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_lattice_search_is_repeatable() {
        let generator = LatticeGenerator::new();
        let config = SearchConfig {
            shape: ShapeCategory::Double,
            search_radius: 3000,
            ..base_config(1)
        };
        let first = run_search(&config, &generator, &CollectingReporter::new()).unwrap();
        let second = run_search(&config, &generator, &CollectingReporter::new()).unwrap();
        assert_eq!(first.matches, second.matches);
        assert_eq!(first.regions_processed, second.regions_processed);
    }
}
