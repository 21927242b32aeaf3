//! Source-table records as they appear in the upstream data dump.
//! Only the fields the pipelines read are modeled; everything else is ignored
//! on load. Missing or `null` fields fall back to empty/none.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type SkillId = u32;

/// Reads `null` as the field's default. Paired with `#[serde(default)]` for
/// missing keys.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Conditional skill replacement used by retrofits, fate simulations and augments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillUpgrade {
    #[serde(default)]
    pub replace: Option<SkillId>,
    #[serde(default)]
    pub with: Option<SkillId>,
}

impl SkillUpgrade {
    /// `(replaced, resulting)` when the upgrade applies; `None` otherwise.
    pub fn active(&self) -> Option<(SkillId, SkillId)> {
        Some((self.replace?, self.with?))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Retrofit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<SkillUpgrade>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FateSimulation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<SkillUpgrade>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchStage {
    #[serde(default)]
    pub fate: Option<FateSimulation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ship {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Skill groups by limit-break level; index 3 is the max-level set.
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<Option<Vec<SkillId>>>,
    #[serde(default)]
    pub retro: Option<Retrofit>,
    #[serde(default)]
    pub research: Option<Vec<ResearchStage>>,
    #[serde(default)]
    pub unique_aug: Option<u32>,
}

impl Ship {
    /// Max-level skill group, falling back to the last group when there are
    /// fewer than four groups or the fourth is empty.
    pub fn base_skill_ids(&self) -> &[SkillId] {
        const MAX_LEVEL_GROUP: usize = 3;

        if let Some(Some(group)) = self.skills.get(MAX_LEVEL_GROUP) {
            if !group.is_empty() {
                return group;
            }
        }
        match self.skills.last() {
            Some(Some(group)) => group,
            _ => &[],
        }
    }

    pub fn retrofit_upgrades(&self) -> &[SkillUpgrade] {
        self.retro.as_ref().map_or(&[], |retro| retro.skills.as_slice())
    }

    /// Fate-simulation upgrades across all research stages, in stage order.
    pub fn fate_upgrades(&self) -> impl Iterator<Item = &SkillUpgrade> {
        self.research
            .iter()
            .flatten()
            .filter_map(|stage| stage.fate.as_ref())
            .flat_map(|fate| fate.skills.iter())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<SkillId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Augment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<SkillId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skill_upgrades: Vec<SkillUpgrade>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub skill_type: u32,
}

/// One named attack pattern of a skill. Parts (`weapon` / `slash` / `summon`)
/// are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarrageVariant {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parts: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BarrageVariant {
    pub fn new(name: impl Into<String>, parts: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            parts,
            extra: Map::new(),
        }
    }
}
