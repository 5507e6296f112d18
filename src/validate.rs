use crate::error::{IsisError, Result};
use crate::intent::{self, Intent};

/// Check every mandatory field is present, non-null and not an empty
/// string in `intent`.
///
/// All missing fields are reported at once, in declaration order, under
/// the names they were declared with.
pub fn validate(intent: &Intent, mandatory: &[&str], instance: &str) -> Result<()> {
    let missing: Vec<String> = mandatory
        .iter()
        .filter(|field| !is_set(intent, field))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IsisError::missing(missing, instance))
    }
}

fn is_set(intent: &Intent, field: &str) -> bool {
    intent::get(intent, field).is_some_and(|v| v.as_str() != Some(""))
}
