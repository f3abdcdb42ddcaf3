//! Structure pieces produced by a generator

use serde::{Deserialize, Serialize};

/// Axis-aligned block box of one piece, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub min_z: i32,
    pub max_x: i32,
    pub max_y: i32,
    pub max_z: i32,
}

impl BoundingBox {
    pub fn new(min_x: i32, min_y: i32, min_z: i32, max_x: i32, max_y: i32, max_z: i32) -> Self {
        Self { min_x, min_y, min_z, max_x, max_y, max_z }
    }

    /// Box with its minimum corner at the given point and the given extent.
    pub fn with_size(min_x: i32, min_y: i32, min_z: i32, size_x: i32, size_y: i32, size_z: i32) -> Self {
        Self::new(
            min_x,
            min_y,
            min_z,
            min_x + size_x - 1,
            min_y + size_y - 1,
            min_z + size_z - 1,
        )
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.max_x >= other.min_x
            && self.min_x <= other.max_x
            && self.max_y >= other.min_y
            && self.min_y <= other.max_y
            && self.max_z >= other.min_z
            && self.min_z <= other.max_z
    }
}

/// Kind of fortress piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Start,
    BridgeStraight,
    BridgeCrossing,
    BridgeEndFiller,
    RoomCrossing,
    StairsRoom,
    MonsterThrone,
    CastleEntrance,
    CastleStalkRoom,
    CastleSmallCorridor,
    CastleSmallCorridorCrossing,
    CastleCorridorStairs,
    CastleCorridorBalcony,
}

impl PieceKind {
    /// Bridge crossings are the crossroads that shapes are built from.
    pub fn is_crossroad(&self) -> bool {
        matches!(self, PieceKind::BridgeCrossing)
    }

    /// Block extent (x, y, z) of a piece of this kind in its default facing.
    pub fn size(&self) -> (i32, i32, i32) {
        match self {
            PieceKind::Start | PieceKind::BridgeCrossing => (19, 10, 19),
            PieceKind::BridgeStraight => (5, 10, 19),
            PieceKind::BridgeEndFiller => (5, 10, 8),
            PieceKind::RoomCrossing => (7, 9, 7),
            PieceKind::StairsRoom => (7, 11, 7),
            PieceKind::MonsterThrone => (7, 8, 9),
            PieceKind::CastleEntrance | PieceKind::CastleStalkRoom => (13, 14, 13),
            PieceKind::CastleSmallCorridor | PieceKind::CastleSmallCorridorCrossing => (5, 7, 5),
            PieceKind::CastleCorridorStairs => (5, 14, 10),
            PieceKind::CastleCorridorBalcony => (9, 7, 9),
        }
    }
}

/// One generated piece. Owned by the generator output buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub bounding_box: BoundingBox,
}

impl Piece {
    pub fn new(kind: PieceKind, bounding_box: BoundingBox) -> Self {
        Self { kind, bounding_box }
    }

    /// Piece of `kind` with its natural size placed at a minimum corner.
    pub fn at(kind: PieceKind, min_x: i32, min_y: i32, min_z: i32) -> Self {
        let (sx, sy, sz) = kind.size();
        Self::new(kind, BoundingBox::with_size(min_x, min_y, min_z, sx, sy, sz))
    }

    /// Bridge crossing at the given minimum corner.
    pub fn crossing(min_x: i32, min_y: i32, min_z: i32) -> Self {
        Self::at(PieceKind::BridgeCrossing, min_x, min_y, min_z)
    }
}
