//! Entity resolution: which skills each ship, equipment and augment can
//! trigger, tagged with provenance and joined with skill and barrage data.

mod resolver;
mod sources;

pub use resolver::{
    resolve_entities, resolve_flat, resolve_ship, resolve_skill, EntityView, ResolvedSkill,
};
pub use sources::{
    flat_skill_sources, ship_skill_sources, Provenance, SkillSources, SHIP_SOURCE_ORDER,
};
