use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{ContentError, Table};

/// Load a content table from the provided JSON file path.
pub fn load(path: &Path) -> Result<Table, ContentError> {
    let data = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&data, &path.display().to_string())
}

/// Load a content table from an in-memory JSON string.
///
/// `origin` names the document in error messages.
pub fn load_str(input: &str, origin: &str) -> Result<Table, ContentError> {
    let table: Table = serde_json::from_str(input).map_err(|source| ContentError::Parse {
        origin: origin.to_string(),
        source,
    })?;
    debug!(origin, records = table.len(), "loaded content table");
    Ok(table)
}
