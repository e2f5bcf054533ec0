use std::fmt;

use serde::Serialize;

/// The three content tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// `items.json`
    Items,
    /// `recipes.json`
    Recipes,
    /// `mobs.json`
    Mobs,
}

impl TableKind {
    /// Short lowercase label used in messages and reports.
    pub fn label(self) -> &'static str {
        match self {
            TableKind::Items => "items",
            TableKind::Recipes => "recipes",
            TableKind::Mobs => "mobs",
        }
    }

    /// File name the table is stored under in a data directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            TableKind::Items => "items.json",
            TableKind::Recipes => "recipes.json",
            TableKind::Mobs => "mobs.json",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category of a content fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// Missing field, wrong type, failed sign/enum constraint, or empty table.
    Schema,
    /// A record names an item id that is absent from the items table.
    Reference,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Schema => f.write_str("schema violation"),
            ViolationKind::Reference => f.write_str("reference violation"),
        }
    }
}

/// A single fault found in a content table, attributed to a record and field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Fault category.
    pub kind: ViolationKind,
    /// Table the fault was found in.
    pub table: TableKind,
    /// Offending record id; `None` for table-level faults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
    /// Offending field path (e.g. `ingredients[1].count`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    /// Schema fault on a field of a record.
    pub fn schema(
        table: TableKind,
        record: &str,
        field: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: ViolationKind::Schema,
            table,
            record: Some(record.to_string()),
            field: field.map(str::to_string),
            message: message.into(),
        }
    }

    /// Dangling item reference in a record.
    pub fn reference(table: TableKind, record: &str, field: &str, item: &str) -> Self {
        Self {
            kind: ViolationKind::Reference,
            table,
            record: Some(record.to_string()),
            field: Some(field.to_string()),
            message: format!("{field} '{item}' not in items"),
        }
    }

    /// The table has no records at all.
    pub fn empty_table(table: TableKind) -> Self {
        Self {
            kind: ViolationKind::Schema,
            table,
            record: None,
            field: None,
            message: format!("{} should not be empty", table.default_file_name()),
        }
    }

    /// `table/record.field` locator for the fault.
    pub fn location(&self) -> String {
        let mut location = self.table.label().to_string();
        if let Some(record) = &self.record {
            location.push('/');
            location.push_str(record);
        }
        if let Some(field) = &self.field {
            location.push('.');
            location.push_str(field);
        }
        location
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}: {}", self.kind, self.location(), self.message)
    }
}

impl std::error::Error for Violation {}
