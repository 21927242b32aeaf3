//! Skill index: the inverse of entity resolution. For every skill id that has
//! barrage data, list the entities that can trigger it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::data::{BarrageVariant, GameTables, SkillId};
use crate::resolve::ship_skill_sources;

/// Which entities an index lists; decides the contributor field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Ships,
    Equips,
}

impl IndexKind {
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Ships => "ships",
            Self::Equips => "equips",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillIndexEntry {
    pub barrages: Vec<BarrageVariant>,
    /// Sorted, unique entity names.
    pub contributors: Vec<String>,
}

/// Skill id -> entry, ascending by id.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillIndex {
    pub kind: IndexKind,
    pub entries: BTreeMap<SkillId, SkillIndexEntry>,
}

impl SkillIndex {
    pub fn get(&self, id: SkillId) -> Option<&SkillIndexEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct EntryFields<'a> {
    kind: IndexKind,
    entry: &'a SkillIndexEntry,
}

impl Serialize for EntryFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("barrages", &self.entry.barrages)?;
        map.serialize_entry(self.kind.field_name(), &self.entry.contributors)?;
        map.end()
    }
}

impl Serialize for SkillIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, entry) in &self.entries {
            map.serialize_entry(
                &id.to_string(),
                &EntryFields {
                    kind: self.kind,
                    entry,
                },
            )?;
        }
        map.end()
    }
}

static TRAILING_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(([^)]+)\)$").expect("static regex"));

/// Moves a trailing parenthesized suffix onto its own line:
/// `"Foo (R)"` -> `"Foo\n(R)"`. Display only.
pub fn display_variant_name(name: &str) -> String {
    TRAILING_PAREN.replace(name, "\n($1)").into_owned()
}

type Contributors = BTreeMap<SkillId, BTreeSet<String>>;

fn merge_contributors(mut into: Contributors, from: Contributors) -> Contributors {
    for (id, names) in from {
        into.entry(id).or_default().extend(names);
    }
    into
}

fn contribute(mut acc: Contributors, name: &str, ids: impl IntoIterator<Item = SkillId>) -> Contributors {
    for id in ids {
        acc.entry(id).or_default().insert(name.to_string());
    }
    acc
}

fn build_index(kind: IndexKind, contributors: Contributors, tables: &GameTables) -> SkillIndex {
    let entries: BTreeMap<SkillId, SkillIndexEntry> = contributors
        .into_iter()
        .filter_map(|(id, names)| {
            // A missing key is skipped; a present but empty list is kept.
            let variants = tables.barrage(id)?;
            let barrages = variants
                .iter()
                .map(|variant| BarrageVariant {
                    name: display_variant_name(&variant.name),
                    ..variant.clone()
                })
                .collect();
            Some((
                id,
                SkillIndexEntry {
                    barrages,
                    contributors: names.into_iter().collect(),
                },
            ))
        })
        .collect();
    tracing::info!(kind = kind.field_name(), entries = entries.len(), "built skill index");
    SkillIndex { kind, entries }
}

/// Ships per skill, using the same base/retrofit/fate/augment cascade as
/// entity resolution.
pub fn build_ship_index(tables: &GameTables) -> SkillIndex {
    let contributors = tables
        .ships
        .values()
        .collect::<Vec<_>>()
        .into_par_iter()
        .fold(Contributors::new, |acc, ship| {
            contribute(acc, &ship.name, ship_skill_sources(ship, tables).ids())
        })
        .reduce(Contributors::new, merge_contributors);
    build_index(IndexKind::Ships, contributors, tables)
}

/// Equipment and augments per skill, from their declared skill lists only.
pub fn build_equip_index(tables: &GameTables) -> SkillIndex {
    let equipments = tables
        .equipments
        .values()
        .map(|equip| (equip.name.as_str(), equip.skills.as_slice()));
    let augments = tables
        .augments
        .values()
        .map(|augment| (augment.name.as_str(), augment.skills.as_slice()));
    let contributors = equipments
        .chain(augments)
        .fold(Contributors::new(), |acc, (name, skills)| {
            contribute(acc, name, skills.iter().copied())
        });
    build_index(IndexKind::Equips, contributors, tables)
}
