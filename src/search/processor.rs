//! Per-region crossroad shape matching
//!
//! Crossings are grouped by floor height, then every crossing of a large
//! enough group is tried as the anchor of every variant of the target shape.

use crate::config::SearchConfig;
use crate::generator::StructureGenerator;
use crate::pieces::{BoundingBox, Piece};
use crate::shapes::{Offset, ShapeCategory, ShapeVariant};

use super::report::Location;

/// Crossings of one region that share a floor height.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightGroup<'a> {
    pub min_y: i32,
    pub boxes: Vec<&'a BoundingBox>,
}

impl HeightGroup<'_> {
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Group the crossroads at or below `max_y` by exact floor height.
///
/// Groups come out in the order their height first appears.
pub fn group_by_height(pieces: &[Piece], max_y: i32) -> Vec<HeightGroup<'_>> {
    let mut groups: Vec<HeightGroup<'_>> = Vec::new();

    for piece in pieces {
        if !piece.kind.is_crossroad() || piece.bounding_box.min_y > max_y {
            continue;
        }
        let bb = &piece.bounding_box;
        match groups.iter_mut().find(|g| g.min_y == bb.min_y) {
            Some(group) => group.boxes.push(bb),
            None => groups.push(HeightGroup { min_y: bb.min_y, boxes: vec![bb] }),
        }
    }

    groups
}

/// Number of boxes other than `boxes[anchor]` sitting on one of the
/// variant's offsets from it. Each box counts at most once.
fn count_partners(boxes: &[&BoundingBox], anchor: usize, variant: &ShapeVariant) -> usize {
    let main = boxes[anchor];
    boxes
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != anchor)
        .filter(|&(_, other)| {
            let offset = Offset::new(
                other.min_x.wrapping_sub(main.min_x),
                other.min_z.wrapping_sub(main.min_z),
            );
            offset.on_grid() && variant.position_of(offset).is_some()
        })
        .count()
}

/// First anchor of the group that completes any variant of `shape`.
pub fn match_in_group(group: &HeightGroup<'_>, shape: ShapeCategory) -> Option<Location> {
    let required = shape.required_offset_count();
    (0..group.boxes.len()).find_map(|anchor| {
        shape
            .variants()
            .iter()
            .any(|variant| count_partners(&group.boxes, anchor, variant) >= required)
            .then(|| Location::from(group.boxes[anchor]))
    })
}

/// First match over all groups with more crossroads than the shape needs
/// partners. A group of exactly that size is never tried.
pub fn find_match(groups: &[HeightGroup<'_>], shape: ShapeCategory) -> Option<Location> {
    let required = shape.required_offset_count();
    groups
        .iter()
        .filter(|group| group.len() > required)
        .find_map(|group| match_in_group(group, shape))
}

/// Generate one region into `pieces` and look for the configured shape.
///
/// `pieces` is scratch space reused across regions.
pub fn process_region<G: StructureGenerator + ?Sized>(
    config: &SearchConfig,
    generator: &G,
    region_x: i32,
    region_z: i32,
    pieces: &mut Vec<Piece>,
) -> Option<Location> {
    generator.generate(
        config.seed,
        region_x,
        region_z,
        config.effective_salt(),
        config.version,
        pieces,
    );
    if pieces.is_empty() {
        return None;
    }

    let groups = group_by_height(pieces, config.max_y);
    find_match(&groups, config.shape)
}
