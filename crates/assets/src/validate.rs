//! Validation passes over loaded tables.
//!
//! Each pass is exposed three ways: a lazy iterator of violations, a
//! collecting `check_*` returning all of them, and a fail-fast `validate_*`
//! returning the first. Records are visited in identifier order, so the first
//! violation is stable across runs.

use serde_json::Value;

use crate::schema::{Item, ItemStack, Mob, Recipe};
use crate::{Table, TableKind, Violation};

/// Lazily yield every violation in the items table.
pub fn item_violations(items: &Table) -> impl Iterator<Item = Violation> + '_ {
    non_empty(items, TableKind::Items)
        .into_iter()
        .chain(items.iter().filter_map(|(id, value)| Item::decode(id, value).err()))
}

/// Lazily yield every violation in the recipes table, resolving item references.
pub fn recipe_violations<'a>(
    items: &'a Table,
    recipes: &'a Table,
) -> impl Iterator<Item = Violation> + 'a {
    recipes
        .iter()
        .flat_map(move |(id, value)| recipe_faults(items, id, value))
}

/// Lazily yield every violation in the mobs table, resolving drop references.
pub fn mob_violations<'a>(items: &'a Table, mobs: &'a Table) -> impl Iterator<Item = Violation> + 'a {
    non_empty(mobs, TableKind::Mobs)
        .into_iter()
        .chain(mobs.iter().flat_map(move |(id, value)| mob_faults(items, id, value)))
}

/// Collect every violation in the items table.
pub fn check_items(items: &Table) -> Vec<Violation> {
    item_violations(items).collect()
}

/// Collect every violation in the recipes table.
pub fn check_recipes(items: &Table, recipes: &Table) -> Vec<Violation> {
    recipe_violations(items, recipes).collect()
}

/// Collect every violation in the mobs table.
pub fn check_mobs(items: &Table, mobs: &Table) -> Vec<Violation> {
    mob_violations(items, mobs).collect()
}

/// Require a non-empty items table whose records all decode.
pub fn validate_items(items: &Table) -> Result<(), Violation> {
    first(item_violations(items))
}

/// Require every recipe to decode and reference existing items.
pub fn validate_recipes(items: &Table, recipes: &Table) -> Result<(), Violation> {
    first(recipe_violations(items, recipes))
}

/// Require a non-empty mobs table whose records decode and drop existing items.
pub fn validate_mobs(items: &Table, mobs: &Table) -> Result<(), Violation> {
    first(mob_violations(items, mobs))
}

fn first(mut violations: impl Iterator<Item = Violation>) -> Result<(), Violation> {
    match violations.next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

fn non_empty(table: &Table, kind: TableKind) -> Option<Violation> {
    table.is_empty().then(|| Violation::empty_table(kind))
}

fn recipe_faults(items: &Table, id: &str, value: &Value) -> Vec<Violation> {
    let recipe = match Recipe::decode(id, value) {
        Ok(recipe) => recipe,
        Err(violation) => return vec![violation],
    };
    let mut faults = Vec::new();
    if !items.contains(&recipe.result.id) {
        faults.push(Violation::reference(
            TableKind::Recipes,
            id,
            "result",
            &recipe.result.id,
        ));
    }
    faults.extend(dangling(items, TableKind::Recipes, id, "ingredients", &recipe.ingredients));
    faults
}

fn mob_faults(items: &Table, id: &str, value: &Value) -> Vec<Violation> {
    let mob = match Mob::decode(id, value) {
        Ok(mob) => mob,
        Err(violation) => return vec![violation],
    };
    dangling(items, TableKind::Mobs, id, "drops", &mob.drops).collect()
}

fn dangling<'a>(
    items: &'a Table,
    table: TableKind,
    record: &'a str,
    field: &'a str,
    stacks: &'a [ItemStack],
) -> impl Iterator<Item = Violation> + 'a {
    stacks
        .iter()
        .enumerate()
        .filter(|(_, stack)| !items.contains(&stack.id))
        .map(move |(index, stack)| {
            Violation::reference(table, record, &format!("{field}[{index}]"), &stack.id)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViolationKind;
    use serde_json::json;

    fn table(value: Value) -> Table {
        serde_json::from_value(value).expect("object table")
    }

    fn items() -> Table {
        table(json!({
            "wood": {"name": "Wood", "stack": 64},
            "plank_item": {"name": "Plank", "stack": 64},
            "bone": {"name": "Bone", "stack": 16},
            "water": {"name": "Water", "stack": 8, "effects": {"thirst": 10, "temperature": -0.5}},
        }))
    }

    fn mob(behavior: &str, drop: &str) -> Value {
        json!({
            "name": "Wolf",
            "behavior": behavior,
            "health": 20,
            "speed": 1.5,
            "aggro_range": 8,
            "attack_range": 1,
            "attack_cooldown": 0.75,
            "damage": 3,
            "biomes": ["forest"],
            "drops": [{"id": drop, "count": 2}],
        })
    }

    #[test]
    fn valid_items_pass() {
        assert_eq!(validate_items(&table(json!({"wood": {"name": "Wood", "stack": 64}}))), Ok(()));
        assert!(check_items(&items()).is_empty());
    }

    #[test]
    fn zero_stack_fails_citing_item_and_field() {
        let err = validate_items(&table(json!({"wood": {"name": "Wood", "stack": 0}})))
            .expect_err("zero stack rejected");
        assert_eq!(err.record.as_deref(), Some("wood"));
        assert_eq!(err.field.as_deref(), Some("stack"));
        assert!(err.to_string().contains("stack must be positive"));
    }

    #[test]
    fn unsupported_effect_fails() {
        let err = validate_items(&table(json!({
            "potion": {"name": "Potion", "stack": 1, "effects": {"mana": 5}},
        })))
        .expect_err("mana rejected");
        assert_eq!(err.record.as_deref(), Some("potion"));
        assert_eq!(err.field.as_deref(), Some("effects.mana"));
        assert!(err.message.contains("unsupported effect 'mana'"));
    }

    #[test]
    fn empty_items_table_fails() {
        let err = validate_items(&Table::default()).expect_err("empty items rejected");
        assert_eq!(err.record, None);
        assert_eq!(err.message, "items.json should not be empty");
    }

    #[test]
    fn collecting_reports_every_faulty_item_in_id_order() {
        let items = table(json!({
            "b": {"name": "B", "stack": 0},
            "a": {"stack": 1},
            "c": {"name": "C", "stack": 3},
        }));
        let records: Vec<_> = check_items(&items)
            .into_iter()
            .map(|v| v.record.unwrap())
            .collect();
        assert_eq!(records, vec!["a", "b"]);
        assert_eq!(validate_items(&items).unwrap_err().record.as_deref(), Some("a"));
    }

    #[test]
    fn recipe_result_must_exist() {
        let recipes = table(json!({
            "plank": {"result": {"id": "plank_item", "count": 4}, "ingredients": [{"id": "wood", "count": 1}]},
        }));
        let items_without_plank = table(json!({"wood": {"name": "Wood", "stack": 64}}));
        let err = validate_recipes(&items_without_plank, &recipes).expect_err("dangling result");
        assert_eq!(err.kind, ViolationKind::Reference);
        assert_eq!(err.field.as_deref(), Some("result"));
        assert_eq!(err.message, "result 'plank_item' not in items");

        assert_eq!(validate_recipes(&items(), &recipes), Ok(()));
    }

    #[test]
    fn recipe_collects_every_dangling_ingredient() {
        let recipes = table(json!({
            "torch": {
                "result": {"id": "torch", "count": 4},
                "ingredients": [{"id": "wood", "count": 1}, {"id": "coal", "count": 1}],
            },
        }));
        let faults = check_recipes(&items(), &recipes);
        let fields: Vec<_> = faults.iter().map(|v| v.field.as_deref().unwrap()).collect();
        assert_eq!(fields, vec!["result", "ingredients[1]"]);
    }

    #[test]
    fn recipe_references_are_case_sensitive() {
        let recipes = table(json!({
            "plank": {"result": {"id": "Plank_Item", "count": 4}},
        }));
        assert!(validate_recipes(&items(), &recipes).is_err());
    }

    #[test]
    fn empty_recipes_table_is_allowed() {
        assert_eq!(validate_recipes(&items(), &Table::default()), Ok(()));
    }

    #[test]
    fn valid_mobs_pass() {
        let mobs = table(json!({"wolf": mob("aggressive", "bone")}));
        assert_eq!(validate_mobs(&items(), &mobs), Ok(()));
    }

    #[test]
    fn invalid_behavior_fails() {
        let mobs = table(json!({"wolf": mob("feral", "bone")}));
        let err = validate_mobs(&items(), &mobs).expect_err("feral rejected");
        assert_eq!(err.record.as_deref(), Some("wolf"));
        assert_eq!(err.field.as_deref(), Some("behavior"));
    }

    #[test]
    fn dangling_drop_fails() {
        let mobs = table(json!({"wolf": mob("patrol", "pelt")}));
        let err = validate_mobs(&items(), &mobs).expect_err("pelt missing");
        assert_eq!(err.kind, ViolationKind::Reference);
        assert_eq!(err.field.as_deref(), Some("drops[0]"));
        assert_eq!(err.message, "drops[0] 'pelt' not in items");
    }

    #[test]
    fn empty_mobs_table_fails() {
        let err = validate_mobs(&items(), &Table::default()).expect_err("empty mobs rejected");
        assert_eq!(err.table, TableKind::Mobs);
    }

    #[test]
    fn validation_is_idempotent() {
        let mobs = table(json!({
            "wolf": mob("feral", "bone"),
            "deer": mob("passive", "pelt"),
        }));
        let items = items();
        assert_eq!(check_mobs(&items, &mobs), check_mobs(&items, &mobs));
        assert_eq!(validate_mobs(&items, &mobs), validate_mobs(&items, &mobs));
    }
}
