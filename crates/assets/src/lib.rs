#![warn(missing_docs)]
//! Content table schema + validation helpers.
//!
//! The game's static content lives in three JSON documents (`items.json`,
//! `recipes.json`, `mobs.json`). This crate loads them as raw [`Table`]s,
//! decodes each record into a typed definition and checks the cross-table
//! references between them.

mod loader;
mod policy;
mod schema;
mod validate;
mod violation;

pub use loader::{load, load_str};
pub use policy::{ContentFiles, ValidationPolicy};
pub use schema::{Behavior, EffectKind, Item, ItemStack, Mob, Recipe};
pub use validate::{
    check_items, check_mobs, check_recipes, item_violations, mob_violations, recipe_violations,
    validate_items, validate_mobs, validate_recipes,
};
pub use violation::{TableKind, Violation, ViolationKind};

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// A raw content table: record identifier to the record's JSON value.
///
/// Records are kept in identifier order so every pass over a table visits
/// them deterministically.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Table {
    records: BTreeMap<String, Value>,
}

impl Table {
    /// Look up a raw record by identifier.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.records.get(id)
    }

    /// Whether a record with exactly this identifier exists.
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Iterate over records in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.records.iter().map(|(id, value)| (id.as_str(), value))
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Errors emitted while reading a content table.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The table file could not be read.
    #[error("failed to read content table {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The table is not valid JSON or its top level is not an object.
    #[error("failed to parse content table {origin}: {source}")]
    Parse {
        /// File path or label of the document being parsed.
        origin: String,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
}
