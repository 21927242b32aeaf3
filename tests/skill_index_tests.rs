mod common;

use barrage_datamine::data::GameTables;
use barrage_datamine::index::{build_equip_index, build_ship_index, IndexKind};
use serde_json::json;

use common::{augment, equipment, fixture_tables, ship, table, variant};

#[test]
fn ship_index_lists_skills_with_barrage_data_only() {
    let index = build_ship_index(&fixture_tables());
    assert_eq!(index.kind, IndexKind::Ships);
    assert_eq!(index.entries.keys().copied().collect::<Vec<_>>(), vec![200, 300, 302, 501]);
    // 101 is triggerable by Laffey but has no barrage entry.
    assert!(index.get(101).is_none());
}

#[test]
fn ship_index_follows_the_full_cascade() {
    let index = build_ship_index(&fixture_tables());
    assert_eq!(index.get(200).unwrap().contributors, vec!["Laffey"]);
    assert_eq!(index.get(302).unwrap().contributors, vec!["Z52"]);
    assert_eq!(index.get(501).unwrap().contributors, vec!["Z52"]);
    // Superseded skills no longer count for the ship.
    assert!(index.get(100).is_none());
}

#[test]
fn empty_barrage_list_is_kept() {
    let index = build_ship_index(&fixture_tables());
    let entry = index.get(300).unwrap();
    assert!(entry.barrages.is_empty());
    assert_eq!(entry.contributors, vec!["Z52"]);
}

#[test]
fn variant_names_get_display_line_break() {
    let index = build_ship_index(&fixture_tables());
    assert_eq!(index.get(200).unwrap().barrages[0].name, "Opening Salvo\n(Retrofit)");
    assert_eq!(index.get(302).unwrap().barrages[0].name, "Dash");
}

#[test]
fn contributors_are_sorted_and_unique() {
    let tables = GameTables {
        ships: table([
            (1, ship(json!({ "name": "Yukikaze", "skills": [[7, 7]] }))),
            (2, ship(json!({ "name": "Ayanami", "skills": [[7]] }))),
            (3, ship(json!({ "name": "Yukikaze", "skills": [[7]] }))),
        ]),
        barrages: table([(7, vec![variant("Spread")])]),
        ..GameTables::default()
    };
    let index = build_ship_index(&tables);
    assert_eq!(index.get(7).unwrap().contributors, vec!["Ayanami", "Yukikaze"]);
}

#[test]
fn equip_index_merges_equipment_and_augments() {
    let tables = GameTables {
        equipments: table([(1, equipment("Gun", &[5])), (2, equipment("Bomb", &[5, 6]))]),
        augments: table([(3, augment(json!({
            "name": "Ring",
            "skills": [6],
            "skill_upgrades": [{ "replace": 6, "with": 8 }]
        })))]),
        barrages: table([
            (5, vec![variant("Shell (Lv. 10)")]),
            (6, vec![variant("Ring Burst")]),
            (8, vec![variant("Ring Burst II")]),
        ]),
        ..GameTables::default()
    };

    let index = build_equip_index(&tables);
    assert_eq!(index.kind, IndexKind::Equips);
    assert_eq!(index.get(5).unwrap().contributors, vec!["Bomb", "Gun"]);
    assert_eq!(index.get(5).unwrap().barrages[0].name, "Shell\n(Lv. 10)");
    assert_eq!(index.get(6).unwrap().contributors, vec!["Bomb", "Ring"]);
    // Augment upgrades are not followed for the equip index.
    assert!(index.get(8).is_none());
}

#[test]
fn fixture_equip_index_serializes_with_equips_field() {
    let index = build_equip_index(&fixture_tables());
    assert_eq!(
        serde_json::to_value(&index).unwrap(),
        json!({
            "400": {
                "barrages": [{
                    "name": "Volley\n(Lv. 10)",
                    "parts": [{ "type": "weapon", "damage": 60, "coefficient": 0.8 }]
                }],
                "equips": ["Torpedo Launcher"]
            }
        })
    );
}

#[test]
fn index_is_independent_of_parallel_scheduling() {
    let tables = fixture_tables();
    let first = serde_json::to_string(&build_ship_index(&tables)).unwrap();
    for _ in 0..4 {
        assert_eq!(serde_json::to_string(&build_ship_index(&tables)).unwrap(), first);
    }
}
