//! Match reporting

use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::pieces::BoundingBox;

/// Block position of a matching anchor crossroad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Location {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl From<&BoundingBox> for Location {
    fn from(bb: &BoundingBox) -> Self {
        Self::new(bb.min_x, bb.min_y, bb.min_z)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// A match together with the region it was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundMatch {
    pub region_x: i32,
    pub region_z: i32,
    pub location: Location,
}

/// Receives matches as workers find them. Called from worker threads, at
/// most once per worker.
pub trait MatchReporter: Sync {
    fn report(&self, found: &FoundMatch);
}

/// Prints each match as a teleport command.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleReporter;

impl MatchReporter for ConsoleReporter {
    fn report(&self, found: &FoundMatch) {
        println!("Found a good shape at /tp {}", found.location);
    }
}

/// Keeps every match in arrival order.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    found: Mutex<Vec<FoundMatch>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.found.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_matches(self) -> Vec<FoundMatch> {
        self.found.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl MatchReporter for CollectingReporter {
    fn report(&self, found: &FoundMatch) {
        self.found.lock().unwrap_or_else(|e| e.into_inner()).push(*found);
    }
}
