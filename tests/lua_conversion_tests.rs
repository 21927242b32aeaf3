mod common;

use barrage_datamine::index::build_equip_index;
use barrage_datamine::lua::{to_lua, to_lua_module};
use serde_json::json;

use common::fixture_tables;

#[test]
fn numeric_keys_sort_before_names() {
    let value = json!({ "b": 1, "10": 1, "a": 1, "2": 1, "1": 1 });
    assert_eq!(
        to_lua(&value),
        "{\n  [\"1\"] = 1,\n  [\"2\"] = 1,\n  [\"10\"] = 1,\n  a = 1,\n  b = 1\n}"
    );
}

#[test]
fn name_keys_use_case_insensitive_collation() {
    let value = json!({ "banana": 3, "Apple": 2, "apple": 1, "Zed": 4 });
    assert_eq!(
        to_lua(&value),
        "{\n  apple = 1,\n  Apple = 2,\n  banana = 3,\n  Zed = 4\n}"
    );
}

#[test]
fn nested_tables_round_out_a_module() {
    let value = json!({
        "ships": {
            "10": { "name": "Laffey", "skills": [1, 2] },
            "2": { "name": "Z52", "skills": [] }
        },
        "count": 2,
        "ratio": 0.5
    });
    let expected = "local p = {
  count = 2,
  ratio = 0.5,
  ships = {
    [\"2\"] = {
      name = \"Z52\",
      skills = {}
    },
    [\"10\"] = {
      name = \"Laffey\",
      skills = { 1, 2 }
    }
  }
}

return p
";
    assert_eq!(to_lua_module(&value), expected);
}

#[test]
fn skill_index_module_escapes_display_names() {
    let value = serde_json::to_value(build_equip_index(&fixture_tables())).unwrap();
    let expected = "local p = {
  [\"400\"] = {
    barrages = { {
      name = \"Volley\\n(Lv. 10)\",
      parts = { {
        coefficient = 0.8,
        damage = 60,
        type = \"weapon\"
      } }
    } },
    equips = { \"Torpedo Launcher\" }
  }
}

return p
";
    assert_eq!(to_lua_module(&value), expected);
}

#[test]
fn same_value_gives_same_bytes() {
    let value = json!({ "x": [1.25, null, "s"], "1": { "y": false } });
    assert_eq!(to_lua(&value), to_lua(&value.clone()));
}
