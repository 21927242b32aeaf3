//! Resolves every ship, equipment and augment into the skills it can trigger,
//! with skill metadata and barrage payload attached.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::data::{BarrageVariant, GameTables, Ship, SkillId};
use crate::parallel::WorkerPool;
use crate::resolve::sources::{flat_skill_sources, ship_skill_sources, Provenance, SkillSources};

/// One skill an entity can trigger.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSkill {
    pub skill_id: SkillId,
    pub skill_name: Option<String>,
    pub skill_type: u32,
    pub provenance: Provenance,
    pub barrage: Option<Vec<BarrageVariant>>,
}

/// Entity name -> resolved skills, in first-insertion order. Inserting a name
/// that is already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityView {
    entries: Vec<(String, Vec<ResolvedSkill>)>,
    positions: HashMap<String, usize>,
}

impl EntityView {
    /// Returns the previous value when `name` was already present.
    pub fn insert(
        &mut self,
        name: String,
        skills: Vec<ResolvedSkill>,
    ) -> Option<Vec<ResolvedSkill>> {
        match self.positions.get(&name) {
            Some(&index) => Some(std::mem::replace(&mut self.entries[index].1, skills)),
            None => {
                self.positions.insert(name.clone(), self.entries.len());
                self.entries.push((name, skills));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[ResolvedSkill]> {
        self.positions
            .get(name)
            .map(|&index| self.entries[index].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ResolvedSkill])> {
        self.entries
            .iter()
            .map(|(name, skills)| (name.as_str(), skills.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for EntityView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, skills) in &self.entries {
            map.serialize_entry(name, skills)?;
        }
        map.end()
    }
}

/// Attach skill metadata and barrage payload. Misses are absent values:
/// unknown skill -> no name, type 0; no barrage entry -> `None`.
pub fn resolve_skill(id: SkillId, provenance: Provenance, tables: &GameTables) -> ResolvedSkill {
    let skill = tables.skill(id);
    ResolvedSkill {
        skill_id: id,
        skill_name: skill
            .and_then(|skill| skill.name.clone())
            .filter(|name| !name.is_empty()),
        skill_type: skill.map_or(0, |skill| skill.skill_type),
        provenance,
        barrage: tables.barrage(id).map(<[BarrageVariant]>::to_vec),
    }
}

fn resolve_sources(sources: &SkillSources, tables: &GameTables) -> Vec<ResolvedSkill> {
    sources
        .iter()
        .map(|(id, provenance)| resolve_skill(id, provenance, tables))
        .collect()
}

pub fn resolve_ship(ship: &Ship, tables: &GameTables) -> Vec<ResolvedSkill> {
    resolve_sources(&ship_skill_sources(ship, tables), tables)
}

pub fn resolve_flat(skills: &[SkillId], provenance: Provenance, tables: &GameTables) -> Vec<ResolvedSkill> {
    resolve_sources(&flat_skill_sources(skills, provenance), tables)
}

/// Resolve ships, then equipment, then augments. Per-entity work runs in
/// parallel on `pool`; results are inserted in table order, so a later entity
/// sharing a name with an earlier one overwrites it regardless of scheduling.
pub fn resolve_entities(tables: &GameTables, pool: &WorkerPool) -> EntityView {
    let (ships, equipments, augments) = pool.install(|| {
        let ships: Vec<(String, Vec<ResolvedSkill>)> = tables
            .ships
            .values()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|ship| (ship.name.clone(), resolve_ship(ship, tables)))
            .collect();
        let equipments: Vec<(String, Vec<ResolvedSkill>)> = tables
            .equipments
            .values()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|equip| {
                (equip.name.clone(), resolve_flat(&equip.skills, Provenance::Equip, tables))
            })
            .collect();
        let augments: Vec<(String, Vec<ResolvedSkill>)> = tables
            .augments
            .values()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|augment| {
                (augment.name.clone(), resolve_flat(&augment.skills, Provenance::Augment, tables))
            })
            .collect();
        (ships, equipments, augments)
    });

    let mut view = EntityView::default();
    let mut overwritten = 0usize;
    for (name, skills) in ships.into_iter().chain(equipments).chain(augments) {
        if view.insert(name, skills).is_some() {
            overwritten += 1;
        }
    }
    if overwritten > 0 {
        tracing::debug!(overwritten, "entities shared a name with an earlier entity");
    }
    tracing::info!(entities = view.len(), "resolved entity skills");
    view
}
