//! Crossroad shape library
//!
//! Each target shape is a category of rigid variants. A variant lists where the
//! other crossroads of a cluster sit relative to one anchor crossroad, in
//! blocks, for one orientation of the shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Spacing of the lattice that bridge crossings snap to.
pub const GRID_UNIT: i32 = 19;

/// Horizontal displacement between two crossroads, in blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub z: i32,
}

impl Offset {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// True if both components land on the crossroad lattice.
    pub fn on_grid(&self) -> bool {
        self.x % GRID_UNIT == 0 && self.z % GRID_UNIT == 0
    }
}

macro_rules! o {
    ($x:literal, $z:literal) => {
        Offset { x: $x, z: $z }
    };
}

/// One orientation of a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeVariant {
    pub offsets: &'static [Offset],
}

impl ShapeVariant {
    /// The first offset equal to `offset`, if any.
    pub fn position_of(&self, offset: Offset) -> Option<usize> {
        self.offsets.iter().position(|&o| o == offset)
    }
}

macro_rules! v {
    ($($x:literal, $z:literal);+) => {
        ShapeVariant { offsets: &[$(o!($x, $z)),+] }
    };
}

// Lines run along either grid axis.
const DOUBLE: [ShapeVariant; 2] = [v![19, 0], v![0, 19]];

const TRIPLE_LINE: [ShapeVariant; 2] = [v![19, 0; 38, 0], v![0, 19; 0, 38]];

const QUAD_LINE: [ShapeVariant; 2] = [
    v![19, 0; 38, 0; 57, 0],
    v![0, 19; 0, 38; 0, 57],
];

const QUINT_LINE: [ShapeVariant; 2] = [
    v![19, 0; 38, 0; 57, 0; 76, 0],
    v![0, 19; 0, 38; 0, 57; 0, 76],
];

// Four L orientations, anchored on the corner that comes first in scan order.
const TRIPLE_CORNER: [ShapeVariant; 4] = [
    v![19, 0; 19, -19],
    v![19, 0; 19, 19],
    v![19, 0; 0, 19],
    v![0, 19; 19, 19],
];

const QUAD_SQUARE: [ShapeVariant; 1] = [v![0, 19; 19, 0; 19, 19]];

// A 2x2 square plus one extra crossroad, in each of its eight placements.
const QUINT_BLOB: [ShapeVariant; 8] = [
    v![0, 19; 0, 38; 19, 19; 19, 38],
    v![0, 19; 19, -19; 19, 0; 19, 19],
    v![0, 19; 19, 0; 19, 19; 38, 0],
    v![0, 19; 19, 0; 19, 19; 38, 19],
    v![0, 19; 19, 0; 19, 19; 19, 38],
    v![0, 19; 0, 38; 19, 0; 19, 19],
    v![19, 0; 19, -19; 38, 0; 38, -19],
    v![19, 0; 19, 19; 38, 0; 38, 19],
];

/// Target crossroad arrangement to search for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeCategory {
    Double,
    TripleLine,
    QuadLine,
    QuintLine,
    TripleCorner,
    QuadSquare,
    QuintBlob,
}

impl ShapeCategory {
    pub const ALL: [ShapeCategory; 7] = [
        ShapeCategory::Double,
        ShapeCategory::TripleLine,
        ShapeCategory::QuadLine,
        ShapeCategory::QuintLine,
        ShapeCategory::TripleCorner,
        ShapeCategory::QuadSquare,
        ShapeCategory::QuintBlob,
    ];

    /// Orientation variants, tried in this order.
    pub fn variants(&self) -> &'static [ShapeVariant] {
        match self {
            ShapeCategory::Double => &DOUBLE,
            ShapeCategory::TripleLine => &TRIPLE_LINE,
            ShapeCategory::QuadLine => &QUAD_LINE,
            ShapeCategory::QuintLine => &QUINT_LINE,
            ShapeCategory::TripleCorner => &TRIPLE_CORNER,
            ShapeCategory::QuadSquare => &QUAD_SQUARE,
            ShapeCategory::QuintBlob => &QUINT_BLOB,
        }
    }

    /// Partners an anchor needs, i.e. cluster size minus one.
    pub fn required_offset_count(&self) -> usize {
        match self {
            ShapeCategory::Double => 1,
            ShapeCategory::TripleLine | ShapeCategory::TripleCorner => 2,
            ShapeCategory::QuadLine | ShapeCategory::QuadSquare => 3,
            ShapeCategory::QuintLine | ShapeCategory::QuintBlob => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeCategory::Double => "DOUBLE",
            ShapeCategory::TripleLine => "TRIPLE_LINE",
            ShapeCategory::QuadLine => "QUAD_LINE",
            ShapeCategory::QuintLine => "QUINT_LINE",
            ShapeCategory::TripleCorner => "TRIPLE_CORNER",
            ShapeCategory::QuadSquare => "QUAD_SQUARE",
            ShapeCategory::QuintBlob => "QUINT_BLOB",
        }
    }
}

impl fmt::Display for ShapeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeCategory::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown crossroad shape '{}'", s))
    }
}
