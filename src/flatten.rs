use serde_json::Value;

use crate::intent::{render_scalar, Intent};
use crate::models::{Variable, VariableTable};

/// Flatten a nested intent into `(NAME, value)` pairs.
///
/// Nested mappings extend the name with `_`-joined uppercase segments and
/// emit nothing for themselves. Sequences and nulls are dropped, never
/// stringified. Booleans render as lowercase `true`/`false`.
pub fn flatten(data: &Intent, prefix: &str) -> Vec<Variable> {
    let mut out = Vec::new();
    flatten_into(&mut out, data, prefix);
    out
}

/// Append the flattened form of `data` to `table`
pub fn flatten_to_table(table: &mut VariableTable, data: &Intent, prefix: &str) {
    table.extend(flatten(data, prefix));
}

fn flatten_into(out: &mut Vec<Variable>, data: &Intent, prefix: &str) {
    for (key, value) in data {
        let name = if prefix.is_empty() {
            key.to_uppercase()
        } else {
            format!("{}_{}", prefix, key.to_uppercase())
        };

        match value {
            Value::Object(nested) => flatten_into(out, nested, &name),
            Value::Array(_) | Value::Null => {}
            scalar => {
                if let Some(value) = render_scalar(scalar) {
                    tracing::trace!("{} : {}", name, value);
                    out.push(Variable { name, value });
                }
            }
        }
    }
}
