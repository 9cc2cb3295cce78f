/// Row validation against a table schema
use crate::types::{Row, Table, Value};

/// Apply the table's field rules to a row about to be inserted
///
/// Schema-less tables take the row as-is. Otherwise every schema field is
/// filled (`auto_inc` > `timestamp` > `default` > null) and fields outside
/// the schema are dropped.
pub fn validate_row(table: &mut Table, row: Row) -> Row {
    validate_row_at(table, row, chrono::Utc::now().timestamp_millis())
}

/// `validate_row` with a fixed clock (milliseconds since the Unix epoch)
pub fn validate_row_at(table: &mut Table, mut row: Row, now_ms: i64) -> Row {
    if !table.has_schema() {
        return row;
    }

    let Table {
        fields,
        auto_increment,
        ..
    } = table;

    for (name, spec) in fields.iter() {
        if spec.auto_increment {
            *auto_increment += 1;
            row.insert(name.clone(), Value::from(*auto_increment));
        } else if spec.timestamp {
            row.insert(name.clone(), Value::from(now_ms));
        } else if !row.contains_key(name) {
            row.insert(name.clone(), spec.default.clone().unwrap_or(Value::Null));
        }
    }

    row.retain(|name, _| fields.contains_key(name));
    row
}
