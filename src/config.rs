use anyhow::{Context, Result};
use gamedata_assets::{ContentFiles, TableKind, ValidationPolicy};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "gamedata.toml";
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Directory holding the three content tables.
    pub data_dir: PathBuf,
    pub items_file: PathBuf,
    pub recipes_file: PathBuf,
    pub mobs_file: PathBuf,
    pub policy: ValidationPolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            items_file: PathBuf::from(TableKind::Items.default_file_name()),
            recipes_file: PathBuf::from(TableKind::Recipes.default_file_name()),
            mobs_file: PathBuf::from(TableKind::Mobs.default_file_name()),
            policy: ValidationPolicy::default(),
        }
    }
}

impl ValidatorConfig {
    /// Load the configuration named on the command line, or the optional default file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => Self::load_optional(Path::new(DEFAULT_CONFIG_PATH)),
        }
    }

    /// Load configuration from a file that must exist and parse.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&contents, path)
    }

    /// Like [`Self::load_from_path`], but a missing file means defaults.
    pub fn load_optional(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents, path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {}. Using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read config {}", path.display()))
            }
        }
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn content_files(&self) -> ContentFiles {
        ContentFiles {
            items: self.items_file.clone(),
            recipes: self.recipes_file.clone(),
            mobs: self.mobs_file.clone(),
        }
    }
}
