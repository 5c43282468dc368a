//! Lookups over the ground structures (bases and cities).
//!
//! Enemy missiles hold a [`TargetRef`], not an entity handle, so every
//! access to a structure goes through these id-based queries.

use hecs::{Entity, World};

use skyshield_core::components::{Base, City, Structure, TargetRef};
use skyshield_core::enums::StructureKind;
use skyshield_core::types::Position;

/// A structure together with its entity and position.
#[derive(Debug, Clone, Copy)]
pub struct StructureEntry {
    pub entity: Entity,
    pub kind: StructureKind,
    pub position: Position,
    pub structure: Structure,
}

impl StructureEntry {
    pub fn target_ref(&self) -> TargetRef {
        TargetRef {
            kind: self.kind,
            id: self.structure.id,
        }
    }

    /// Half-extent AABB containment of a point.
    pub fn contains(&self, point: &Position) -> bool {
        (point.x - self.position.x).abs() <= self.structure.half_width
            && (point.y - self.position.y).abs() <= self.structure.half_height
    }
}

/// All structures of one kind, ordered by id.
pub fn pool(world: &World, kind: StructureKind) -> Vec<StructureEntry> {
    let mut entries: Vec<StructureEntry> = match kind {
        StructureKind::Base => world
            .query::<(&Base, &Position, &Structure)>()
            .iter()
            .map(|(entity, (_, position, structure))| StructureEntry {
                entity,
                kind,
                position: *position,
                structure: *structure,
            })
            .collect(),
        StructureKind::City => world
            .query::<(&City, &Position, &Structure)>()
            .iter()
            .map(|(entity, (_, position, structure))| StructureEntry {
                entity,
                kind,
                position: *position,
                structure: *structure,
            })
            .collect(),
    };

    entries.sort_by_key(|e| e.structure.id);
    entries
}

/// Resolve a target reference.
pub fn resolve(world: &World, target: TargetRef) -> Option<StructureEntry> {
    pool(world, target.kind)
        .into_iter()
        .find(|e| e.structure.id == target.id)
}

/// Position of a base that can still fire.
pub fn standing_base_position(world: &World, base_id: u32) -> Option<Position> {
    resolve(
        world,
        TargetRef {
            kind: StructureKind::Base,
            id: base_id,
        },
    )
    .filter(|e| !e.structure.destroyed)
    .map(|e| e.position)
}

/// Undestroyed base closest to `(x, y)`. Ties go to the lowest id.
pub fn nearest_standing_base(world: &World, x: f64, y: f64) -> Option<u32> {
    let point = Position::new(x, y);
    let mut nearest = None;
    let mut min_distance = f64::INFINITY;

    for entry in pool(world, StructureKind::Base) {
        if entry.structure.destroyed {
            continue;
        }
        let distance = entry.position.distance_to(&point);
        if nearest.is_none() || distance < min_distance {
            min_distance = distance;
            nearest = Some(entry.structure.id);
        }
    }

    nearest
}

/// True once no base and no city is left standing.
pub fn defenses_lost(world: &World) -> bool {
    world
        .query::<&Structure>()
        .iter()
        .all(|(_, structure)| structure.destroyed)
}

/// Mark a structure destroyed. Returns false if it was already down.
pub fn destroy(world: &mut World, entity: Entity) -> bool {
    match world.get::<&mut Structure>(entity) {
        Ok(mut structure) if !structure.destroyed => {
            structure.destroyed = true;
            true
        }
        _ => false,
    }
}
