//! Run policy and table file layout of a data directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{TableKind, Violation};

/// Whether a pass stops at its first violation or reports all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Report only the first violation of each pass.
    FailFast,
    /// Report every violation of each pass.
    #[default]
    Collect,
}

impl ValidationPolicy {
    /// Drain `violations` according to the policy.
    pub fn apply(self, violations: impl Iterator<Item = Violation>) -> Vec<Violation> {
        match self {
            ValidationPolicy::FailFast => violations.take(1).collect(),
            ValidationPolicy::Collect => violations.collect(),
        }
    }
}

/// File names of the three tables inside a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFiles {
    /// Items table file name.
    pub items: PathBuf,
    /// Recipes table file name.
    pub recipes: PathBuf,
    /// Mobs table file name.
    pub mobs: PathBuf,
}

impl Default for ContentFiles {
    fn default() -> Self {
        Self {
            items: PathBuf::from(TableKind::Items.default_file_name()),
            recipes: PathBuf::from(TableKind::Recipes.default_file_name()),
            mobs: PathBuf::from(TableKind::Mobs.default_file_name()),
        }
    }
}

impl ContentFiles {
    /// Path of `table` resolved against `dir`.
    pub fn path_in(&self, dir: &Path, table: TableKind) -> PathBuf {
        let name = match table {
            TableKind::Items => &self.items,
            TableKind::Recipes => &self.recipes,
            TableKind::Mobs => &self.mobs,
        };
        dir.join(name)
    }
}
