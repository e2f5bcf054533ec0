//! Golden JSON files for run reports.
//!
//! A golden is compared as a JSON value, so its whitespace and key order do not
//! matter; a mismatch names the first differing path (`$.checks[1].status`).
//! Rerun with `GAMEDATA_UPDATE_SNAPSHOTS=1` to rewrite goldens.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "GAMEDATA_UPDATE_SNAPSHOTS";

/// Assert that `value` serializes to the JSON stored at `path`.
///
/// With `GAMEDATA_UPDATE_SNAPSHOTS=1` the golden is rewritten instead.
pub fn assert_json_snapshot<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = serde_json::to_value(value).context("Failed to serialize snapshot value")?;

    if update_requested() {
        return write_golden(path, &actual);
    }

    let text = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {UPDATE_SNAPSHOTS_ENV}=1 to create it)",
            path.display()
        )
    })?;
    let expected: Value = serde_json::from_str(&text)
        .with_context(|| format!("Snapshot {} is not valid JSON", path.display()))?;

    if let Some(at) = first_difference(&expected, &actual, "$".to_string()) {
        bail!(
            "Snapshot mismatch at {} ({at}); run with {UPDATE_SNAPSHOTS_ENV}=1 to update\n--- actual ---\n{}",
            path.display(),
            canonical_json(&actual)?
        );
    }
    Ok(())
}

/// Pretty JSON with sorted keys and a trailing newline, the way goldens are written.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    // serde_json's default `Map` is key-ordered.
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let mut text = serde_json::to_string_pretty(&value).context("Failed to format snapshot JSON")?;
    text.push('\n');
    Ok(text)
}

fn update_requested() -> bool {
    std::env::var(UPDATE_SNAPSHOTS_ENV)
        .is_ok_and(|flag| matches!(flag.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

fn write_golden(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create snapshot directory {}", parent.display()))?;
    }
    fs::write(path, canonical_json(value)?)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))
}

fn first_difference(expected: &Value, actual: &Value, at: String) -> Option<String> {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            let extra = actual.keys().filter(|key| !expected.contains_key(*key));
            for key in expected.keys().chain(extra) {
                let path = format!("{at}.{key}");
                match (expected.get(key), actual.get(key)) {
                    (Some(e), Some(a)) => {
                        if let Some(found) = first_difference(e, a, path) {
                            return Some(found);
                        }
                    }
                    _ => return Some(path),
                }
            }
            None
        }
        (Value::Array(expected), Value::Array(actual)) => {
            for (index, (e, a)) in expected.iter().zip(actual).enumerate() {
                if let Some(found) = first_difference(e, a, format!("{at}[{index}]")) {
                    return Some(found);
                }
            }
            (expected.len() != actual.len()).then(|| {
                format!("{at}: {} entries expected, {} found", expected.len(), actual.len())
            })
        }
        _ => (expected != actual).then_some(at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TempDataDir;
    use serde_json::json;

    #[test]
    fn canonical_json_sorts_keys_recursively() {
        let text = canonical_json(&json!({"b": 1, "a": {"d": [{"z": 0, "y": 1}], "c": null}}))
            .expect("serializes");
        assert_eq!(
            text,
            "{\n  \"a\": {\n    \"c\": null,\n    \"d\": [\n      {\n        \"y\": 1,\n        \"z\": 0\n      }\n    ]\n  },\n  \"b\": 1\n}\n"
        );
    }

    #[test]
    fn mismatch_names_the_differing_path() {
        let dir = TempDataDir::create("snapshot_mismatch").expect("dir");
        let path = dir
            .write_raw(
                "golden.json",
                r#"{"checks": [{"name": "items", "status": "pass"}, {"name": "mobs", "status": "pass"}]}"#,
            )
            .expect("golden");
        let actual = json!({"checks": [
            {"name": "items", "status": "pass"},
            {"name": "mobs", "status": "fail"},
        ]});
        let err = assert_json_snapshot(&path, &actual).expect_err("mismatch");
        let message = err.to_string();
        assert!(message.contains("Snapshot mismatch"), "{message}");
        assert!(message.contains("$.checks[1].status"), "{message}");
    }

    #[test]
    fn missing_and_extra_entries_are_mismatches() {
        assert_eq!(
            first_difference(&json!({"a": 1}), &json!({"a": 1, "b": 2}), "$".to_string()),
            Some("$.b".to_string())
        );
        assert_eq!(
            first_difference(&json!([1, 2]), &json!([1]), "$".to_string()),
            Some("$: 2 entries expected, 1 found".to_string())
        );
    }

    #[test]
    fn golden_layout_does_not_matter() {
        let dir = TempDataDir::create("snapshot_match").expect("dir");
        let path = dir
            .write_raw("golden.json", "{ \"b\": [1, 2],\r\n  \"a\": 1 }\r\n")
            .expect("golden");
        assert_json_snapshot(&path, &json!({"a": 1, "b": [1, 2]})).expect("snapshot matches");
    }
}
