//! Source data: record types and the keyed tables they are loaded into.

pub mod table;
pub mod types;

pub use table::{load_table, GameTables, Table};
pub use types::{
    Augment, BarrageVariant, Equipment, FateSimulation, ResearchStage, Retrofit, Ship, Skill,
    SkillId, SkillUpgrade,
};
