//! Small, valid sample tables plus helpers for building broken variants.

use gamedata_assets::Table;
use serde_json::{json, Value};

/// Build a [`Table`] from a JSON object literal.
///
/// Panics if `value` is not an object; fixtures are expected to be well formed.
pub fn table(value: Value) -> Table {
    serde_json::from_value(value).expect("fixture table must be a JSON object")
}

/// Items covering plain, fractional-free and effect-bearing records.
pub fn sample_items() -> Value {
    json!({
        "wood": {"name": "Wood", "stack": 64},
        "plank": {"name": "Plank", "stack": 64},
        "stick": {"name": "Stick", "stack": 64},
        "bone": {"name": "Bone", "stack": 32},
        "raw_meat": {"name": "Raw Meat", "stack": 16, "effects": {"hunger": 4, "health": -1}},
        "water_flask": {
            "name": "Water Flask",
            "stack": 1,
            "effects": {"thirst": 12.5, "temperature": -0.5}
        }
    })
}

/// Recipes referencing only [`sample_items`].
pub fn sample_recipes() -> Value {
    json!({
        "plank": {
            "result": {"id": "plank", "count": 4},
            "ingredients": [{"id": "wood", "count": 1}]
        },
        "stick": {
            "result": {"id": "stick", "count": 4},
            "ingredients": [{"id": "plank", "count": 2}]
        }
    })
}

/// Mobs whose drops reference only [`sample_items`].
pub fn sample_mobs() -> Value {
    json!({
        "wolf": mob_record("aggressive", &[("bone", 1), ("raw_meat", 2)]),
        "deer": {
            "name": "Deer",
            "behavior": "passive",
            "health": 12,
            "speed": 2.25,
            "aggro_range": 0,
            "attack_range": 0,
            "attack_cooldown": 1,
            "damage": 0,
            "biomes": ["forest", "plains"],
            "drops": [{"id": "raw_meat", "count": 3}]
        }
    })
}

/// A valid mob record with the given behaviour and `(item, count)` drops.
pub fn mob_record(behavior: &str, drops: &[(&str, u32)]) -> Value {
    let drops: Vec<Value> = drops
        .iter()
        .map(|(id, count)| json!({"id": id, "count": count}))
        .collect();
    json!({
        "name": "Wolf",
        "behavior": behavior,
        "health": 20,
        "speed": 1.5,
        "aggro_range": 8,
        "attack_range": 1.25,
        "attack_cooldown": 0.75,
        "damage": 4,
        "biomes": ["forest", "taiga"],
        "drops": drops
    })
}
