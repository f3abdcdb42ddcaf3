//! Parallel region search
//!
//! A [`RegionCursor`] hands regions to a fixed pool of workers. Each worker
//! generates its region and looks for the target crossroad shape in it.

pub mod cursor;
pub mod driver;
pub mod processor;
pub mod report;
pub mod results;
pub mod worker;

pub use cursor::{RegionBounds, RegionCursor};
pub use driver::{region_bounds, run_search, SearchError, SearchSummary};
pub use processor::{find_match, group_by_height, process_region, HeightGroup};
pub use report::{CollectingReporter, ConsoleReporter, FoundMatch, Location, MatchReporter};
pub use results::write_results;
