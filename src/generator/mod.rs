//! Structure generation seam
//!
//! The search only needs the pieces a generator lays out for one placement
//! region. Anything that reproduces a world's fortresses can sit behind
//! [`StructureGenerator`].

pub mod lattice;

use crate::pieces::Piece;
use crate::version::Version;

pub use lattice::LatticeGenerator;

/// Lays out the structure pieces of one placement region.
///
/// Implementations must be deterministic: the same inputs always give the same
/// pieces in the same order.
pub trait StructureGenerator: Sync {
    /// Clear `pieces` and fill it with the pieces of region
    /// (`region_x`, `region_z`). An empty buffer means no structure.
    fn generate(
        &self,
        seed: i64,
        region_x: i32,
        region_z: i32,
        salt: i32,
        version: Version,
        pieces: &mut Vec<Piece>,
    );

    /// Side of a placement region in chunks.
    fn region_size(&self, version: Version) -> i32 {
        version.region_size()
    }
}
