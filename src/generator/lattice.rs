//! Deterministic lattice fortress generator
//!
//! Grows a bridge network outward from a start piece over cells of the
//! crossroad lattice. Each cell holds one piece; crossings keep the network
//! branching, straights carry it on, fillers and castle rooms end a branch.
//! Floors drift between a few fixed levels so crossroads split into height
//! groups the way real fortresses do.

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::StructureGenerator;
use crate::pieces::{Piece, PieceKind};
use crate::shapes::GRID_UNIT;
use crate::version::Version;

/// Floor levels a bridge network can sit on.
const FLOOR_LEVELS: [i32; 5] = [48, 56, 64, 72, 80];

/// Index into FLOOR_LEVELS of the start piece.
const START_LEVEL: usize = 2;

/// Cells a network may reach from its start along either axis.
const MAX_CELL_REACH: i32 = 6;

const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Stand-in fortress generator working on the 19-block crossroad lattice.
#[derive(Clone, Debug)]
pub struct LatticeGenerator {
    /// Bounds on the number of pieces in one network.
    pub min_pieces: usize,
    pub max_pieces: usize,
    /// Chance a crossing extends in each free direction.
    pub branch_chance: f64,
    /// Chance a new cell changes floor level.
    pub level_shift_chance: f64,
}

impl Default for LatticeGenerator {
    fn default() -> Self {
        Self {
            min_pieces: 30,
            max_pieces: 120,
            branch_chance: 0.6,
            level_shift_chance: 0.12,
        }
    }
}

struct Cell {
    x: i32,
    z: i32,
    level: usize,
    kind: PieceKind,
    /// Direction the network entered this cell from.
    heading: (i32, i32),
}

impl LatticeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn region_rng(seed: i64, region_x: i32, region_z: i32, salt: i32) -> ChaCha8Rng {
        let mixed = (region_x as i64)
            .wrapping_mul(341873128712)
            .wrapping_add((region_z as i64).wrapping_mul(132897987541))
            .wrapping_add(seed)
            .wrapping_add(salt as i64);
        ChaCha8Rng::seed_from_u64(mixed as u64)
    }

    /// Block position of the start piece, or None if the region is empty.
    fn start_position(
        rng: &mut ChaCha8Rng,
        region_x: i32,
        region_z: i32,
        version: Version,
    ) -> Option<(i32, i32)> {
        let size = version.region_size();
        let (chunk_x, chunk_z) = if version.uses_salt() {
            // Shared placement grid with bastions; fortresses win two in five.
            let chunk_x = region_x * size + rng.gen_range(0..size - 4);
            let chunk_z = region_z * size + rng.gen_range(0..size - 4);
            if rng.gen_range(0..5) >= 2 {
                return None;
            }
            (chunk_x, chunk_z)
        } else {
            if rng.gen_range(0..3) != 0 {
                return None;
            }
            (
                region_x * size + 4 + rng.gen_range(0..8),
                region_z * size + 4 + rng.gen_range(0..8),
            )
        };
        Some((chunk_x * 16 + 2, chunk_z * 16 + 2))
    }

    fn next_kind(&self, rng: &mut ChaCha8Rng, remaining: usize) -> PieceKind {
        if remaining == 0 {
            return PieceKind::BridgeEndFiller;
        }
        match rng.gen_range(0..100) {
            0..=34 => PieceKind::BridgeCrossing,
            35..=79 => PieceKind::BridgeStraight,
            80..=89 => PieceKind::BridgeEndFiller,
            90..=94 => PieceKind::CastleEntrance,
            _ => PieceKind::CastleCorridorStairs,
        }
    }

    fn next_level(&self, rng: &mut ChaCha8Rng, level: usize) -> usize {
        if !rng.gen_bool(self.level_shift_chance) {
            return level;
        }
        if level == 0 || (level + 1 < FLOOR_LEVELS.len() && rng.gen_bool(0.5)) {
            level + 1
        } else {
            level - 1
        }
    }
}

impl StructureGenerator for LatticeGenerator {
    fn generate(
        &self,
        seed: i64,
        region_x: i32,
        region_z: i32,
        salt: i32,
        version: Version,
        pieces: &mut Vec<Piece>,
    ) {
        pieces.clear();

        let salt = if version.uses_salt() { salt } else { 0 };
        let mut rng = Self::region_rng(seed, region_x, region_z, salt);
        let Some((origin_x, origin_z)) = Self::start_position(&mut rng, region_x, region_z, version)
        else {
            return;
        };

        let budget = rng.gen_range(self.min_pieces..=self.max_pieces.max(self.min_pieces));
        let mut occupied: HashSet<(i32, i32)> = HashSet::new();
        let mut frontier: VecDeque<Cell> = VecDeque::new();

        occupied.insert((0, 0));
        frontier.push_back(Cell {
            x: 0,
            z: 0,
            level: START_LEVEL,
            kind: PieceKind::Start,
            heading: (0, 0),
        });

        while let Some(cell) = frontier.pop_front() {
            pieces.push(Piece::at(
                cell.kind,
                origin_x + cell.x * GRID_UNIT,
                FLOOR_LEVELS[cell.level],
                origin_z + cell.z * GRID_UNIT,
            ));

            let exits: &[(i32, i32)] = match cell.kind {
                PieceKind::Start | PieceKind::BridgeCrossing => &DIRECTIONS,
                PieceKind::BridgeStraight => std::slice::from_ref(&cell.heading),
                _ => &[],
            };

            for &(dx, dz) in exits {
                let remaining = budget.saturating_sub(pieces.len() + frontier.len());
                if remaining == 0 {
                    break;
                }
                let straight_on = cell.kind == PieceKind::BridgeStraight;
                if !straight_on && !rng.gen_bool(self.branch_chance) {
                    continue;
                }

                let (nx, nz) = (cell.x + dx, cell.z + dz);
                if nx.abs() > MAX_CELL_REACH || nz.abs() > MAX_CELL_REACH {
                    continue;
                }
                if !occupied.insert((nx, nz)) {
                    continue;
                }

                let kind = self.next_kind(&mut rng, remaining - 1);
                let level = self.next_level(&mut rng, cell.level);
                frontier.push_back(Cell {
                    x: nx,
                    z: nz,
                    level,
                    kind,
                    heading: (dx, dz),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::FORTRESS_SALT;

    fn generate(seed: i64, rx: i32, rz: i32, salt: i32, version: Version) -> Vec<Piece> {
        let mut pieces = Vec::new();
        LatticeGenerator::new().generate(seed, rx, rz, salt, version, &mut pieces);
        pieces
    }

    /// Regions around the origin that hold a network for this seed.
    fn populated_regions(seed: i64, version: Version) -> Vec<Vec<Piece>> {
        let mut found = Vec::new();
        for rx in -6..=6 {
            for rz in -6..=6 {
                let pieces = generate(seed, rx, rz, version.default_salt(), version);
                if !pieces.is_empty() {
                    found.push(pieces);
                }
            }
        }
        found
    }

    #[test]
    fn test_deterministic() {
        for rx in -3..3 {
            for rz in -3..3 {
                let a = generate(1234, rx, rz, 7, Version::V1_16_1);
                let b = generate(1234, rx, rz, 7, Version::V1_16_1);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_reused_buffer_is_cleared() {
        let generator = LatticeGenerator::new();
        let mut pieces = vec![Piece::crossing(0, 0, 0); 500];
        generator.generate(99, 0, 0, 0, Version::V1_12, &mut pieces);
        assert_eq!(pieces, generate(99, 0, 0, 0, Version::V1_12));
    }

    #[test]
    fn test_some_regions_empty_and_some_populated() {
        let populated = populated_regions(42, Version::V1_16_1).len();
        assert!(populated > 0);
        assert!(populated < 13 * 13);
    }

    #[test]
    fn test_crossroads_sit_on_lattice() {
        for pieces in populated_regions(5, Version::V1_8) {
            let start = pieces[0].bounding_box;
            assert_eq!(pieces[0].kind, PieceKind::Start);
            for piece in &pieces {
                assert_eq!((piece.bounding_box.min_x - start.min_x) % GRID_UNIT, 0);
                assert_eq!((piece.bounding_box.min_z - start.min_z) % GRID_UNIT, 0);
                assert!(FLOOR_LEVELS.contains(&piece.bounding_box.min_y));
            }
        }
    }

    #[test]
    fn test_piece_budget_respected() {
        let generator = LatticeGenerator::default();
        for pieces in populated_regions(77, Version::V1_20) {
            assert!(pieces.len() <= generator.max_pieces);
        }
    }

    #[test]
    fn test_start_inside_region() {
        let version = Version::V1_16_5;
        let region_blocks = version.region_size() * 16;
        for rx in -4..=4 {
            for rz in -4..=4 {
                let pieces = generate(2024, rx, rz, FORTRESS_SALT, version);
                if let Some(start) = pieces.first() {
                    let bx = start.bounding_box.min_x;
                    let bz = start.bounding_box.min_z;
                    assert!(bx >= rx * region_blocks && bx < (rx + 1) * region_blocks);
                    assert!(bz >= rz * region_blocks && bz < (rz + 1) * region_blocks);
                }
            }
        }
    }

    #[test]
    fn test_unsalted_versions_ignore_salt() {
        for rx in -2..=2 {
            assert_eq!(
                generate(8, rx, 1, 0, Version::V1_15),
                generate(8, rx, 1, 555, Version::V1_15)
            );
        }
    }
}
