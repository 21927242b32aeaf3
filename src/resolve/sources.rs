//! Which skills an entity can trigger, and how it obtained each one.

use serde::{Deserialize, Serialize};

use crate::data::{GameTables, Ship, SkillId, SkillUpgrade};

/// How an entity obtained a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Ship,
    Retrofit,
    Fate,
    Augment,
    Equip,
}

/// Pass order for ship skills. A later pass overrides the provenance of a
/// skill recorded by an earlier one.
pub const SHIP_SOURCE_ORDER: [Provenance; 4] = [
    Provenance::Ship,
    Provenance::Retrofit,
    Provenance::Fate,
    Provenance::Augment,
];

/// Ordered `skill id -> provenance` association list. Each id appears once;
/// the last write decides the provenance, the first write decides the position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSources {
    entries: Vec<(SkillId, Provenance)>,
}

impl SkillSources {
    fn position(&self, id: SkillId) -> Option<usize> {
        self.entries.iter().position(|&(existing, _)| existing == id)
    }

    /// Insert `id`, or re-tag it in place if already present.
    pub fn record(&mut self, id: SkillId, provenance: Provenance) {
        match self.position(id) {
            Some(index) => self.entries[index].1 = provenance,
            None => self.entries.push((id, provenance)),
        }
    }

    /// Apply an upgrade: `with` supersedes `replaced`. An already recorded
    /// `with` is re-tagged and `replaced` dropped; otherwise `with` takes the
    /// replaced skill's slot, or is appended if that skill was never recorded.
    pub fn supersede(&mut self, replaced: SkillId, with: SkillId, provenance: Provenance) {
        if replaced == with {
            self.record(with, provenance);
            return;
        }
        match (self.position(with), self.position(replaced)) {
            (Some(with_index), replaced_index) => {
                self.entries[with_index].1 = provenance;
                if let Some(index) = replaced_index {
                    self.entries.remove(index);
                }
            }
            (None, Some(index)) => self.entries[index] = (with, provenance),
            (None, None) => self.entries.push((with, provenance)),
        }
    }

    fn apply_upgrades<'a>(
        &mut self,
        upgrades: impl IntoIterator<Item = &'a SkillUpgrade>,
        provenance: Provenance,
    ) {
        for (replaced, with) in upgrades.into_iter().filter_map(SkillUpgrade::active) {
            self.supersede(replaced, with, provenance);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillId, Provenance)> + '_ {
        self.entries.iter().copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.entries.iter().map(|&(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flat skill list with a single provenance (equipment, augments).
pub fn flat_skill_sources(skills: &[SkillId], provenance: Provenance) -> SkillSources {
    let mut sources = SkillSources::default();
    for &id in skills {
        sources.record(id, provenance);
    }
    sources
}

/// Every skill a ship can trigger: base kit, retrofit, fate simulation and
/// unique augment, applied in [SHIP_SOURCE_ORDER].
pub fn ship_skill_sources(ship: &Ship, tables: &GameTables) -> SkillSources {
    let mut sources = SkillSources::default();
    for provenance in SHIP_SOURCE_ORDER {
        match provenance {
            Provenance::Ship => {
                for &id in ship.base_skill_ids() {
                    sources.record(id, Provenance::Ship);
                }
            }
            Provenance::Retrofit => {
                sources.apply_upgrades(ship.retrofit_upgrades(), Provenance::Retrofit);
            }
            Provenance::Fate => sources.apply_upgrades(ship.fate_upgrades(), Provenance::Fate),
            Provenance::Augment => {
                // An unresolvable augment reference contributes nothing.
                let Some(augment) = ship.unique_aug.and_then(|id| tables.augment(id)) else {
                    continue;
                };
                for &id in &augment.skills {
                    sources.record(id, Provenance::Augment);
                }
                sources.apply_upgrades(&augment.skill_upgrades, Provenance::Augment);
            }
            Provenance::Equip => {}
        }
    }
    sources
}
