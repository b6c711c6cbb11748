pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Fields of a result object holding arrays of objects (schedules, rankings).
pub(crate) fn tabular_fields(
    map: &serde_json::Map<String, Value>,
) -> Vec<(&String, &Vec<Value>)> {
    map.iter()
        .filter_map(|(k, v)| match v {
            Value::Array(items) if items.first().map_or(false, Value::is_object) => {
                Some((k, items))
            }
            _ => None,
        })
        .collect()
}
