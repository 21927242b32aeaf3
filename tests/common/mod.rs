//! Small hand-written source tables shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use barrage_datamine::data::{
    Augment, BarrageVariant, Equipment, GameTables, Ship, Skill, SkillId, Table,
};
use serde_json::{json, Value};

pub fn table<T>(entries: impl IntoIterator<Item = (u32, T)>) -> Table<T> {
    entries
        .into_iter()
        .map(|(id, value)| (id.to_string(), value))
        .collect()
}

pub fn ship(value: Value) -> Ship {
    serde_json::from_value(value).expect("ship fixture")
}

pub fn augment(value: Value) -> Augment {
    serde_json::from_value(value).expect("augment fixture")
}

pub fn equipment(name: &str, skills: &[SkillId]) -> Equipment {
    Equipment {
        name: name.to_string(),
        skills: skills.to_vec(),
    }
}

pub fn skill(name: &str, skill_type: u32) -> Skill {
    Skill {
        name: Some(name.to_string()),
        skill_type,
    }
}

pub fn variant(name: &str) -> BarrageVariant {
    BarrageVariant::new(name, vec![json!({ "type": "weapon", "damage": 100, "coefficient": 1.5 })])
}

/// The raw JSON documents behind [fixture_tables].
pub fn fixture_documents() -> [(&'static str, Value); 5] {
    [
        (
            "ships.json",
            json!({
                "10": {
                    "name": "Laffey",
                    "skills": [[100], [100, 101]],
                    "retro": { "skills": [{ "replace": 100, "with": 200 }, { "replace": null, "with": 999 }] }
                },
                "2": {
                    "name": "Z52",
                    "skills": [[300], [300], [300], [300, 301], [300, 301]],
                    "research": [{ "fate": { "skills": [{ "replace": 301, "with": 302 }] } }],
                    "unique_aug": 7
                },
                "30": { "name": "Plain", "skills": [] }
            }),
        ),
        (
            "equipments.json",
            json!({
                "1": { "name": "Torpedo Launcher", "skills": [400] },
                "5": { "name": "Shell Loader", "skills": [] }
            }),
        ),
        (
            "augments.json",
            json!({
                "7": {
                    "name": "Z52 Blade",
                    "skills": [500],
                    "skill_upgrades": [{ "replace": 500, "with": 501 }]
                }
            }),
        ),
        (
            "skills.json",
            json!({
                "100": { "name": "Opening Salvo", "type": 1 },
                "200": { "name": "Opening Salvo+", "type": 1 },
                "300": { "name": "Dash", "type": 2 },
                "302": { "name": "Dash Fate", "type": 2 },
                "400": { "name": "Torpedo Volley", "type": 3 },
                "501": { "name": "Blade Slash", "type": 1 }
            }),
        ),
        (
            "barrages.json",
            json!({
                "200": [{ "name": "Opening Salvo (Retrofit)", "parts": [{ "type": "weapon", "damage": 48 }] }],
                "300": [],
                "302": [{ "name": "Dash", "parts": [{ "type": "slash", "damage": 120 }] }],
                "400": [{ "name": "Volley (Lv. 10)", "parts": [{ "type": "weapon", "damage": 60, "coefficient": 0.8 }] }],
                "501": [{ "name": "Blade", "parts": [{ "type": "summon", "armor": 2 }] }]
            }),
        ),
    ]
}

pub fn write_fixture_dir(dir: &Path) {
    fs::create_dir_all(dir).expect("fixture dir");
    for (file, document) in fixture_documents() {
        let raw = serde_json::to_string_pretty(&document).expect("fixture json");
        fs::write(dir.join(file), raw).expect("fixture write");
    }
}

pub fn fixture_tables() -> GameTables {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixture_dir(dir.path());
    GameTables::load(&barrage_datamine::config::DataPaths::in_dir(dir.path())).expect("fixture tables")
}
