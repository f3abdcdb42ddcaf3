//! Shared region cursor
//!
//! Hands out every region of a rectangle exactly once, X outer and Z inner,
//! to however many workers ask for one.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Inclusive rectangle of region coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl RegionBounds {
    pub fn new(min_x: i32, max_x: i32, min_z: i32, max_z: i32) -> Self {
        Self { min_x, max_x, min_z, max_z }
    }

    /// Square of half-width `radius` around a center region.
    pub fn around(center_x: i32, center_z: i32, radius: i32) -> Self {
        Self::new(center_x - radius, center_x + radius, center_z - radius, center_z + radius)
    }

    /// Number of regions covered; zero if the rectangle is empty.
    pub fn region_count(&self) -> u64 {
        let width = (self.max_x as i64 - self.min_x as i64 + 1).max(0) as u64;
        let depth = (self.max_z as i64 - self.min_z as i64 + 1).max(0) as u64;
        width * depth
    }
}

#[derive(Debug)]
struct ScanPosition {
    // Widened so stepping past an i32::MAX bound cannot wrap.
    x: i64,
    z: i32,
}

/// Lock-guarded scan position over a [`RegionBounds`].
#[derive(Debug)]
pub struct RegionCursor {
    bounds: RegionBounds,
    position: Mutex<ScanPosition>,
}

impl RegionCursor {
    pub fn new(bounds: RegionBounds) -> Self {
        // An empty Z range never advances X, so such a cursor starts exhausted.
        let x = if bounds.min_z > bounds.max_z {
            bounds.max_x as i64 + 1
        } else {
            bounds.min_x as i64
        };
        Self {
            bounds,
            position: Mutex::new(ScanPosition { x, z: bounds.min_z }),
        }
    }

    pub fn bounds(&self) -> RegionBounds {
        self.bounds
    }

    /// Next region to process, or None once the rectangle is used up.
    ///
    /// The lock covers only the read and step of the scan position.
    pub fn take_next(&self) -> Option<(i32, i32)> {
        // The guarded state is two integers, always consistent between steps.
        let mut position = self.position.lock().unwrap_or_else(|e| e.into_inner());

        if position.x > self.bounds.max_x as i64 {
            return None;
        }
        let region = (position.x as i32, position.z);

        if position.z >= self.bounds.max_z {
            position.z = self.bounds.min_z;
            position.x += 1;
        } else {
            position.z += 1;
        }

        Some(region)
    }
}
