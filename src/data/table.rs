//! Keyed source tables and the bundle of all five, loaded once per run.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::config::DataPaths;
use crate::data::types::{Augment, BarrageVariant, Equipment, Ship, Skill, SkillId};
use crate::error::{PipelineError, Result};

/// Keys that JS object iteration treats as array indices: canonical decimal
/// (no leading zero except "0"), below 2^32 - 1.
fn index_key(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|&index| index != u32::MAX)
}

fn iteration_order(a: &str, b: &str) -> Ordering {
    match (index_key(a), index_key(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A JSON object keyed by id strings with O(1) lookup by key. Iteration
/// follows JS object order: index-like keys ascending, then every other key
/// in document order.
#[derive(Debug, Clone)]
pub struct Table<T> {
    entries: Vec<(String, T)>,
    by_key: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            by_key: HashMap::new(),
        }
    }
}

impl<T> Table<T> {
    /// Later duplicates replace the earlier value in place.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, T)>) -> Self {
        let mut deduped: Vec<(String, T)> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (key, value) in entries {
            match seen.get(&key) {
                Some(&index) => deduped[index].1 = value,
                None => {
                    seen.insert(key.clone(), deduped.len());
                    deduped.push((key, value));
                }
            }
        }
        // Stable, so non-index keys keep their insertion order.
        deduped.sort_by(|(a, _), (b, _)| iteration_order(a, b));
        let by_key = deduped
            .iter()
            .enumerate()
            .map(|(index, (key, _))| (key.clone(), index))
            .collect();
        Self {
            entries: deduped,
            by_key,
        }
    }

    /// Lookup by id. Numeric ids are formatted the way the table keys them.
    pub fn get(&self, key: impl Display) -> Option<&T> {
        self.by_key
            .get(&key.to_string())
            .map(|&index| &self.entries[index].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> FromIterator<(String, T)> for Table<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

struct TableVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for TableVisitor<T> {
    type Value = Table<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object keyed by id")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, T>()? {
            entries.push(entry);
        }
        Ok(Table::from_entries(entries))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Table<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

/// Read a JSON object file into a [Table], keeping document order.
pub fn load_table<T: DeserializeOwned>(path: &Path) -> Result<Table<T>> {
    let raw = fs::read_to_string(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// All source tables for one pipeline run. Immutable after load.
#[derive(Debug, Clone, Default)]
pub struct GameTables {
    pub ships: Table<Ship>,
    pub equipments: Table<Equipment>,
    pub augments: Table<Augment>,
    pub skills: Table<Skill>,
    pub barrages: Table<Vec<BarrageVariant>>,
}

impl GameTables {
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let tables = Self {
            ships: load_table(&paths.ships)?,
            equipments: load_table(&paths.equipments)?,
            augments: load_table(&paths.augments)?,
            skills: load_table(&paths.skills)?,
            barrages: load_table(&paths.barrages)?,
        };
        tracing::debug!(
            ships = tables.ships.len(),
            equipments = tables.equipments.len(),
            augments = tables.augments.len(),
            skills = tables.skills.len(),
            barrages = tables.barrages.len(),
            "loaded source tables"
        );
        Ok(tables)
    }

    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.skills.get(id)
    }

    /// Barrage variants keyed by skill id. `Some(&[])` (present but empty) is
    /// distinct from `None` (no entry at all).
    pub fn barrage(&self, id: SkillId) -> Option<&[BarrageVariant]> {
        self.barrages.get(id).map(Vec::as_slice)
    }

    pub fn augment(&self, id: u32) -> Option<&Augment> {
        self.augments.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_iterates_numeric_keys_in_value_order() {
        let table: Table<u32> = [("10", 10), ("9", 9), ("100", 100), ("x", 0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["9", "10", "100", "x"]);
        assert_eq!(table.get(100), Some(&100));
        assert_eq!(table.get("x"), Some(&0));
        assert!(table.get(11).is_none());
    }

    #[test]
    fn other_keys_keep_document_order() {
        let table: Table<u32> =
            serde_json::from_str(r#"{"b": 1, "007": 2, "3": 3, "a": 4, "1": 5}"#).unwrap();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["1", "3", "b", "007", "a"]);
        assert_eq!(table.get("007"), Some(&2));
    }

    #[test]
    fn duplicate_keys_keep_first_position_and_last_value() {
        let table = Table::from_entries([
            ("x".to_string(), 1),
            ("y".to_string(), 2),
            ("x".to_string(), 3),
        ]);
        let entries: Vec<(&str, &u32)> = table.iter().collect();
        assert_eq!(entries, vec![("x", &3), ("y", &2)]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_table::<Skill>(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, PipelineError::Read { .. }));
    }

    #[test]
    fn barrage_lookup_distinguishes_empty_from_missing() {
        let mut tables = GameTables::default();
        tables.barrages = [("5".to_string(), Vec::new())].into_iter().collect();
        assert_eq!(tables.barrage(5).map(<[_]>::len), Some(0));
        assert!(tables.barrage(6).is_none());
    }
}
