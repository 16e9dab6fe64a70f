//! File readers that materialize local CSV/Excel data as a [`Table`]
//!
//! These are the inbound counterparts of the export functions: read a
//! whole file, coerce cells to scalar values, hand the table to a
//! warehouse load.
//!
//! [`Table`]: crate::table::Table

mod csv;
mod excel;

pub use csv::read_csv_table;
pub use excel::read_excel_table;

use crate::table::Value;

/// Coerce a text cell to the narrowest scalar that round-trips it
///
/// Empty text is null; `true`/`false` (any case) are booleans; integers
/// before floats; RFC 3339 timestamps before plain strings.
pub(crate) fn parse_scalar(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    match text.to_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = text.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = text.parse::<f64>() {
        return Value::Float(f);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Value::DateTime(dt.with_timezone(&chrono::Utc));
    }
    Value::String(text.to_string())
}
