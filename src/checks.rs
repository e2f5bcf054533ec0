//! Registered content checks and the runner that executes them.
//!
//! Checks are listed explicitly in [`CHECKS`]; nothing is discovered by
//! naming convention. Each check declares the tables it reads, and the runner
//! loads every needed table once before running the checks independently.

use gamedata_assets::{
    item_violations, load, mob_violations, recipe_violations, ContentError, ContentFiles, Table,
    TableKind, ValidationPolicy, Violation,
};
use std::{collections::BTreeMap, path::Path};
use tracing::{debug, info};

use crate::report::{CheckOutcome, RunReport};

/// A named validation pass over one or more tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Items,
    Recipes,
    Mobs,
}

/// Every registered check, in run order.
pub const CHECKS: &[Check] = &[Check::Items, Check::Recipes, Check::Mobs];

/// Loaded tables keyed by kind; a failed load is kept so dependent checks can report it.
type Loaded = BTreeMap<TableKind, Result<Table, ContentError>>;

impl Check {
    pub fn name(self) -> &'static str {
        match self {
            Check::Items => "items",
            Check::Recipes => "recipes",
            Check::Mobs => "mobs",
        }
    }

    /// Tables this check reads.
    pub fn tables(self) -> &'static [TableKind] {
        match self {
            Check::Items => &[TableKind::Items],
            Check::Recipes => &[TableKind::Items, TableKind::Recipes],
            Check::Mobs => &[TableKind::Items, TableKind::Mobs],
        }
    }

    /// Run against the loaded tables, or describe why a needed table is unavailable.
    fn run(self, loaded: &Loaded, policy: ValidationPolicy) -> Result<Vec<Violation>, String> {
        let violations = match self {
            Check::Items => policy.apply(item_violations(loaded_table(loaded, TableKind::Items)?)),
            Check::Recipes => policy.apply(recipe_violations(
                loaded_table(loaded, TableKind::Items)?,
                loaded_table(loaded, TableKind::Recipes)?,
            )),
            Check::Mobs => policy.apply(mob_violations(
                loaded_table(loaded, TableKind::Items)?,
                loaded_table(loaded, TableKind::Mobs)?,
            )),
        };
        Ok(violations)
    }
}

fn loaded_table(loaded: &Loaded, kind: TableKind) -> Result<&Table, String> {
    match loaded.get(&kind) {
        Some(Ok(table)) => Ok(table),
        Some(Err(err)) => Err(err.to_string()),
        None => Err(format!("{kind} table not loaded")),
    }
}

/// Registered check names, in run order.
pub fn names() -> Vec<&'static str> {
    CHECKS.iter().map(|check| check.name()).collect()
}

/// Resolve `--only` names to checks; empty selects everything.
///
/// Returns the first unknown name on failure.
pub fn select(only: &[String]) -> Result<Vec<Check>, String> {
    if only.is_empty() {
        return Ok(CHECKS.to_vec());
    }
    for name in only {
        if !CHECKS.iter().any(|check| check.name() == name) {
            return Err(name.clone());
        }
    }
    Ok(CHECKS
        .iter()
        .copied()
        .filter(|check| only.iter().any(|name| name == check.name()))
        .collect())
}

/// Load the tables the selected checks need and run each check.
///
/// A table that fails to load turns every check that reads it into an error
/// outcome; the remaining checks still run.
pub fn run(
    data_dir: &Path,
    files: &ContentFiles,
    checks: &[Check],
    policy: ValidationPolicy,
) -> RunReport {
    let mut loaded = Loaded::new();
    for check in checks {
        for &kind in check.tables() {
            loaded
                .entry(kind)
                .or_insert_with(|| load(&files.path_in(data_dir, kind)));
        }
    }

    let outcomes = checks
        .iter()
        .map(|check| match check.run(&loaded, policy) {
            Ok(violations) => {
                debug!(check = check.name(), violations = violations.len(), "check finished");
                CheckOutcome::completed(check.name(), violations)
            }
            Err(error) => CheckOutcome::error(check.name(), error),
        })
        .collect();

    let report = RunReport::from_outcomes(outcomes);
    info!(
        checks = report.checks.len(),
        passed = report.passed,
        failed = report.failed,
        "content validation finished"
    );
    report
}
