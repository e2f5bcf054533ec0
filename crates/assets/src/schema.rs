//! Typed content records decoded from raw table entries.
//!
//! Every field is deserialized into its Rust type exactly once. A decode
//! failure is reported as a [`Violation`] naming the record and the field path,
//! and stops further decoding of that record.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::{TableKind, Violation};

/// Consumable effect kinds an item may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EffectKind {
    /// Restores or drains hunger.
    Hunger,
    /// Restores or drains thirst.
    Thirst,
    /// Warms or cools the consumer.
    Temperature,
    /// Heals or damages the consumer.
    Health,
}

impl EffectKind {
    /// Every supported effect kind, in declaration order.
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Hunger,
        EffectKind::Thirst,
        EffectKind::Temperature,
        EffectKind::Health,
    ];

    /// Parse an effect key. Keys are case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hunger" => Some(EffectKind::Hunger),
            "thirst" => Some(EffectKind::Thirst),
            "temperature" => Some(EffectKind::Temperature),
            "health" => Some(EffectKind::Health),
            _ => None,
        }
    }

    /// Key used for this effect in `items.json`.
    pub fn as_str(self) -> &'static str {
        match self {
            EffectKind::Hunger => "hunger",
            EffectKind::Thirst => "thirst",
            EffectKind::Temperature => "temperature",
            EffectKind::Health => "health",
        }
    }
}

/// Mob AI behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    /// Never attacks.
    Passive,
    /// Chases and melees targets inside its aggro range.
    Aggressive,
    /// Attacks from a distance.
    Ranged,
    /// Walks a route and engages intruders.
    Patrol,
}

/// An `{id, count}` reference to an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    /// Referenced item identifier.
    pub id: String,
    /// Strictly positive quantity.
    pub count: u32,
}

/// A decoded `items.json` record.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Record identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Maximum stack size, strictly positive.
    pub stack: u32,
    /// Consumable effects, when the item declares any.
    pub effects: Option<BTreeMap<EffectKind, f64>>,
}

/// A decoded `recipes.json` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Record identifier.
    pub id: String,
    /// Produced item and quantity.
    pub result: ItemStack,
    /// Consumed items, in authoring order.
    pub ingredients: Vec<ItemStack>,
}

/// A decoded `mobs.json` record.
#[derive(Debug, Clone, PartialEq)]
pub struct Mob {
    /// Record identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// AI behaviour.
    pub behavior: Behavior,
    /// Hit points, strictly positive.
    pub health: f64,
    /// Movement speed, strictly positive.
    pub speed: f64,
    /// Distance at which the mob notices targets.
    pub aggro_range: f64,
    /// Distance at which the mob can hit targets.
    pub attack_range: f64,
    /// Seconds between attacks, strictly positive.
    pub attack_cooldown: f64,
    /// Damage per hit.
    pub damage: f64,
    /// Biome tags the mob spawns in; never empty.
    pub biomes: BTreeSet<String>,
    /// Loot dropped on death.
    pub drops: Vec<ItemStack>,
}

impl Item {
    /// Decode one `items.json` record.
    pub fn decode(id: &str, value: &Value) -> Result<Self, Violation> {
        let fields = Fields::of(TableKind::Items, id, value)?;
        let name = fields.string("name")?;
        let stack = fields.count("stack")?;
        let effects = match fields.get("effects") {
            Some(raw) => Some(decode_effects(&fields, raw)?),
            None => None,
        };
        Ok(Item {
            id: id.to_string(),
            name,
            stack,
            effects,
        })
    }
}

impl Recipe {
    /// Decode one `recipes.json` record. Item references are not resolved here.
    pub fn decode(id: &str, value: &Value) -> Result<Self, Violation> {
        let fields = Fields::of(TableKind::Recipes, id, value)?;
        let result = ItemStack::decode(&fields, "result", fields.raw("result")?)?;
        let ingredients = fields.stack_list("ingredients")?;
        Ok(Recipe {
            id: id.to_string(),
            result,
            ingredients,
        })
    }
}

impl Mob {
    /// Decode one `mobs.json` record. Drop references are not resolved here.
    pub fn decode(id: &str, value: &Value) -> Result<Self, Violation> {
        let fields = Fields::of(TableKind::Mobs, id, value)?;
        let name = fields.string("name")?;
        let behavior = fields.required::<Behavior>("behavior")?;
        let health = fields.real("health", Sign::Positive)?;
        let speed = fields.real("speed", Sign::Positive)?;
        let aggro_range = fields.real("aggro_range", Sign::NonNegative)?;
        let attack_range = fields.real("attack_range", Sign::NonNegative)?;
        let attack_cooldown = fields.real("attack_cooldown", Sign::Positive)?;
        let damage = fields.real("damage", Sign::NonNegative)?;
        let biomes = decode_biomes(&fields)?;
        let drops = fields.stack_list("drops")?;
        Ok(Mob {
            id: id.to_string(),
            name,
            behavior,
            health,
            speed,
            aggro_range,
            attack_range,
            attack_cooldown,
            damage,
            biomes,
            drops,
        })
    }
}

impl ItemStack {
    fn decode<'a>(parent: &Fields<'a>, field: &str, raw: &'a Value) -> Result<Self, Violation> {
        let stack = parent.nested(field, raw)?;
        Ok(ItemStack {
            id: stack.string("id")?,
            count: stack.count("count")?,
        })
    }
}

fn decode_effects(
    fields: &Fields<'_>,
    raw: &Value,
) -> Result<BTreeMap<EffectKind, f64>, Violation> {
    let entries: Map<String, Value> = fields.decode("effects", raw)?;
    let mut effects = BTreeMap::new();
    for (key, magnitude) in &entries {
        let path = format!("effects.{key}");
        let kind = EffectKind::parse(key).ok_or_else(|| {
            fields.fault(
                &path,
                format!("unsupported effect '{key}' (expected one of {})", effect_names()),
            )
        })?;
        let magnitude = magnitude.as_f64().ok_or_else(|| {
            fields.fault(
                &path,
                format!("effect '{key}' must be numeric, got {}", json_type(magnitude)),
            )
        })?;
        effects.insert(kind, magnitude);
    }
    Ok(effects)
}

fn decode_biomes(fields: &Fields<'_>) -> Result<BTreeSet<String>, Violation> {
    let tags: Vec<String> = fields.required("biomes")?;
    if tags.is_empty() {
        return Err(fields.fault("biomes", "biomes must not be empty"));
    }
    let mut biomes = BTreeSet::new();
    for (index, tag) in tags.into_iter().enumerate() {
        if tag.trim().is_empty() {
            return Err(fields.fault(&format!("biomes[{index}]"), "biome tag must not be empty"));
        }
        biomes.insert(tag);
    }
    Ok(biomes)
}

fn effect_names() -> String {
    EffectKind::ALL
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Copy)]
enum Sign {
    Positive,
    NonNegative,
}

impl Sign {
    fn admits(self, value: f64) -> bool {
        match self {
            Sign::Positive => value > 0.0,
            Sign::NonNegative => value >= 0.0,
        }
    }

    fn requirement(self) -> &'static str {
        match self {
            Sign::Positive => "must be positive",
            Sign::NonNegative => "must not be negative",
        }
    }
}

/// Field accessor over one record (or one nested object inside a record).
struct Fields<'a> {
    table: TableKind,
    record: &'a str,
    prefix: String,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn of(table: TableKind, record: &'a str, value: &'a Value) -> Result<Self, Violation> {
        let map = value.as_object().ok_or_else(|| {
            Violation::schema(
                table,
                record,
                None,
                format!("record must be a JSON object, got {}", json_type(value)),
            )
        })?;
        Ok(Self {
            table,
            record,
            prefix: String::new(),
            map,
        })
    }

    fn nested(&self, field: &str, value: &'a Value) -> Result<Fields<'a>, Violation> {
        let map = value.as_object().ok_or_else(|| {
            self.fault(
                field,
                format!("{field} must be a JSON object, got {}", json_type(value)),
            )
        })?;
        Ok(Fields {
            table: self.table,
            record: self.record,
            prefix: self.path(field),
            map,
        })
    }

    fn path(&self, field: &str) -> String {
        if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{field}", self.prefix)
        }
    }

    fn fault(&self, field: &str, message: impl Into<String>) -> Violation {
        Violation::schema(self.table, self.record, Some(self.path(field).as_str()), message)
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field)
    }

    fn raw(&self, field: &str) -> Result<&'a Value, Violation> {
        self.get(field)
            .ok_or_else(|| self.fault(field, format!("missing {field}")))
    }

    fn decode<T: DeserializeOwned>(&self, field: &str, value: &Value) -> Result<T, Violation> {
        T::deserialize(value).map_err(|err| self.fault(field, format!("invalid {field}: {err}")))
    }

    fn required<T: DeserializeOwned>(&self, field: &str) -> Result<T, Violation> {
        self.decode(field, self.raw(field)?)
    }

    fn string(&self, field: &str) -> Result<String, Violation> {
        self.required(field)
    }

    fn count(&self, field: &str) -> Result<u32, Violation> {
        let number: Number = self.required(field)?;
        positive_count(&number).map_err(|problem| self.fault(field, format!("{field} {problem}")))
    }

    fn real(&self, field: &str, sign: Sign) -> Result<f64, Violation> {
        let value: f64 = self.required(field)?;
        if !sign.admits(value) {
            return Err(self.fault(
                field,
                format!("{field} {}, got {value}", sign.requirement()),
            ));
        }
        Ok(value)
    }

    /// Optional array of item stacks; absent means empty.
    fn stack_list(&self, field: &str) -> Result<Vec<ItemStack>, Violation> {
        let Some(raw) = self.get(field) else {
            return Ok(Vec::new());
        };
        let entries = raw.as_array().ok_or_else(|| {
            self.fault(
                field,
                format!("{field} must be an array, got {}", json_type(raw)),
            )
        })?;
        let mut stacks = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            stacks.push(ItemStack::decode(self, &format!("{field}[{index}]"), entry)?);
        }
        Ok(stacks)
    }
}

/// Accept any JSON number with a whole, strictly positive value that fits `u32`.
fn positive_count(number: &Number) -> Result<u32, String> {
    if let Some(value) = number.as_u64() {
        if value == 0 {
            return Err("must be positive, got 0".to_string());
        }
        return u32::try_from(value).map_err(|_| format!("is out of range, got {value}"));
    }
    if let Some(value) = number.as_i64() {
        return Err(format!("must be positive, got {value}"));
    }
    let value = number.as_f64().unwrap_or(f64::NAN);
    if value.fract() != 0.0 {
        return Err(format!("must be a whole number, got {value}"));
    }
    if value <= 0.0 {
        return Err(format!("must be positive, got {value}"));
    }
    if value > f64::from(u32::MAX) {
        return Err(format!("is out of range, got {value}"));
    }
    Ok(value as u32)
}
