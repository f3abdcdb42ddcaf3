//! Per-thread search loop

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::config::SearchConfig;
use crate::generator::StructureGenerator;

use super::cursor::RegionCursor;
use super::processor::process_region;
use super::report::{FoundMatch, MatchReporter};

/// State every worker of one search shares.
pub struct SharedSearch<'a> {
    pub config: &'a SearchConfig,
    pub generator: &'a dyn StructureGenerator,
    pub cursor: &'a RegionCursor,
    pub reporter: &'a dyn MatchReporter,
    /// Set once any worker has reported a match.
    pub found: AtomicBool,
    /// Regions taken from the cursor so far, across all workers.
    pub processed: AtomicU64,
}

impl<'a> SharedSearch<'a> {
    pub fn new(
        config: &'a SearchConfig,
        generator: &'a dyn StructureGenerator,
        cursor: &'a RegionCursor,
        reporter: &'a dyn MatchReporter,
    ) -> Self {
        Self {
            config,
            generator,
            cursor,
            reporter,
            found: AtomicBool::new(false),
            processed: AtomicU64::new(0),
        }
    }

    /// Only consulted between regions, so a region once taken is always
    /// processed to the end.
    fn should_stop(&self) -> bool {
        self.config.stop_on_first && self.found.load(Ordering::Acquire)
    }
}

/// What one worker did before its loop ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub regions: u64,
    pub found: Option<FoundMatch>,
}

/// Pull regions until the cursor runs dry or this worker finds a match.
///
/// Other workers are not told about a match unless the config asks to stop
/// on the first one.
pub fn worker_loop(shared: &SharedSearch<'_>) -> WorkerStats {
    let mut pieces = Vec::new();
    let mut stats = WorkerStats::default();

    while !shared.should_stop() {
        let Some((region_x, region_z)) = shared.cursor.take_next() else {
            break;
        };
        stats.regions += 1;
        shared.processed.fetch_add(1, Ordering::Relaxed);

        let location =
            process_region(shared.config, shared.generator, region_x, region_z, &mut pieces);
        if let Some(location) = location {
            let found = FoundMatch { region_x, region_z, location };
            shared.reporter.report(&found);
            shared.found.store(true, Ordering::Release);
            stats.found = Some(found);
            break;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;
    use crate::search::cursor::RegionBounds;
    use crate::search::report::{CollectingReporter, Location};
    use crate::shapes::ShapeCategory;
    use crate::version::Version;

    /// Puts a DOUBLE at the region's own coordinates for the listed regions.
    struct Hits(Vec<(i32, i32)>);

    impl StructureGenerator for Hits {
        fn generate(&self, _: i64, rx: i32, rz: i32, _: i32, _: Version, pieces: &mut Vec<Piece>) {
            pieces.clear();
            if self.0.contains(&(rx, rz)) {
                pieces.push(Piece::crossing(rx * 1000, 64, rz * 1000));
                pieces.push(Piece::crossing(rx * 1000 + 19, 64, rz * 1000));
            }
        }
    }

    fn config(stop_on_first: bool) -> SearchConfig {
        SearchConfig {
            shape: ShapeCategory::Double,
            stop_on_first,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_runs_until_exhausted() {
        let config = config(false);
        let generator = Hits(Vec::new());
        let cursor = RegionCursor::new(RegionBounds::around(0, 0, 3));
        let reporter = CollectingReporter::new();
        let shared = SharedSearch::new(&config, &generator, &cursor, &reporter);

        let stats = worker_loop(&shared);
        assert_eq!(stats.regions, 49);
        assert_eq!(stats.found, None);
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_stops_own_loop_on_match() {
        let config = config(false);
        let generator = Hits(vec![(0, 1), (1, 0)]);
        let cursor = RegionCursor::new(RegionBounds::new(0, 1, 0, 1));
        let reporter = CollectingReporter::new();
        let shared = SharedSearch::new(&config, &generator, &cursor, &reporter);

        let first = worker_loop(&shared);
        assert_eq!(first.regions, 2);
        assert_eq!(first.found.map(|f| f.location), Some(Location::new(0, 64, 1000)));

        // Without stop-on-first a second worker carries on past the match.
        let second = worker_loop(&shared);
        assert_eq!(second.regions, 1);
        assert_eq!(second.found.map(|f| (f.region_x, f.region_z)), Some((1, 0)));

        assert_eq!(reporter.len(), 2);
        assert_eq!(shared.processed.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_stop_on_first_halts_later_workers() {
        let config = config(true);
        let generator = Hits(vec![(0, 0)]);
        let cursor = RegionCursor::new(RegionBounds::around(0, 0, 2));
        let reporter = CollectingReporter::new();
        let shared = SharedSearch::new(&config, &generator, &cursor, &reporter);

        assert!(worker_loop(&shared).found.is_some());
        let after = worker_loop(&shared);
        assert_eq!(after.regions, 0);
        assert!(cursor.take_next().is_some());
    }
}
