/// Table storage and per-field schema rules
use super::{Row, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field rule in a table schema
///
/// Serialized with the short attribute names of the persisted document
/// (`auto_inc`, `timestamp`, `def`); attributes that are off are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Overwrite the field with the table's next auto-increment value
    #[serde(rename = "auto_inc", default, skip_serializing_if = "is_false")]
    pub auto_increment: bool,
    /// Overwrite the field with the current time (ms since epoch)
    #[serde(default, skip_serializing_if = "is_false")]
    pub timestamp: bool,
    /// Value used when the row leaves the field out
    #[serde(rename = "def", default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn timestamp(mut self) -> Self {
        self.timestamp = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// True when the field carries no rule at all
    pub fn is_plain(&self) -> bool {
        !self.auto_increment && !self.timestamp && self.default.is_none()
    }
}

/// A named collection of rows with an optional schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Field name -> rule. Empty means schema-less.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldSpec>,
    /// Last value handed out by `next_auto_increment`
    #[serde(rename = "auto_inc", default)]
    pub auto_increment: u64,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name.into(), spec);
        self
    }

    pub fn has_schema(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Advance the counter and return the new value; it never decreases
    pub fn next_auto_increment(&mut self) -> u64 {
        self.auto_increment += 1;
        self.auto_increment
    }
}
