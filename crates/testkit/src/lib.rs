#![warn(missing_docs)]
//! Test surfaces for content validation: scratch data directories, fixture
//! tables and golden JSON snapshots.

pub mod fixtures;
mod snapshot;

use anyhow::{Context, Result};
use gamedata_assets::TableKind;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

pub use snapshot::*;

static NEXT_DIR: AtomicU64 = AtomicU64::new(0);

/// A uniquely named data directory under the system temp dir.
///
/// The directory and everything in it is removed on drop.
#[derive(Debug)]
pub struct TempDataDir {
    root: PathBuf,
}

impl TempDataDir {
    /// Create a fresh empty directory; `label` makes leftovers recognisable.
    pub fn create(label: &str) -> Result<Self> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before unix epoch")?
            .as_nanos();
        let seq = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!(
            "gamedata_{label}_{}_{timestamp}_{seq}",
            std::process::id()
        ));
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create {}", root.display()))?;
        Ok(Self { root })
    }

    /// Create a directory pre-populated with the three sample tables.
    pub fn with_samples(label: &str) -> Result<Self> {
        let dir = Self::create(label)?;
        dir.write_table(TableKind::Items, &fixtures::sample_items())?;
        dir.write_table(TableKind::Recipes, &fixtures::sample_recipes())?;
        dir.write_table(TableKind::Mobs, &fixtures::sample_mobs())?;
        Ok(dir)
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write `value` as the table's default file, returning the file path.
    pub fn write_table(&self, table: TableKind, value: &Value) -> Result<PathBuf> {
        let contents = serde_json::to_string_pretty(value).context("Failed to encode table")?;
        self.write_raw(table.default_file_name(), &contents)
    }

    /// Write arbitrary text (e.g. malformed JSON) to `file_name`.
    pub fn write_raw(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(file_name);
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), bytes = contents.len(), "wrote fixture file");
        Ok(path)
    }

    /// Delete one table file, e.g. to simulate a missing table.
    pub fn remove_table(&self, table: TableKind) -> Result<()> {
        let path = self.root.join(table.default_file_name());
        fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))
    }
}

impl Drop for TempDataDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedata_assets::{check_items, check_mobs, check_recipes, load};

    #[test]
    fn sample_directory_loads_and_validates_clean() {
        let dir = TempDataDir::with_samples("testkit_samples").expect("samples written");
        let load_table =
            |kind: TableKind| load(&dir.path().join(kind.default_file_name())).expect("loads");
        let items = load_table(TableKind::Items);
        let recipes = load_table(TableKind::Recipes);
        let mobs = load_table(TableKind::Mobs);
        assert_eq!(check_items(&items), Vec::new());
        assert_eq!(check_recipes(&items, &recipes), Vec::new());
        assert_eq!(check_mobs(&items, &mobs), Vec::new());
    }

    #[test]
    fn directory_is_removed_on_drop() {
        let dir = TempDataDir::create("testkit_drop").expect("dir created");
        let path = dir.path().to_path_buf();
        dir.write_raw("note.txt", "scratch").expect("write");
        assert!(path.exists());
        drop(dir);
        assert!(!path.exists());
    }

    #[test]
    fn directories_are_unique() {
        let a = TempDataDir::create("testkit_unique").expect("a");
        let b = TempDataDir::create("testkit_unique").expect("b");
        assert_ne!(a.path(), b.path());
    }
}
