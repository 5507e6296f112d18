use serde::{Deserialize, Serialize};

/// Variables whose values are never written to the log
const REDACTED: &[&str] = &["PASSWD"];

/// A single rendering variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

/// Ordered variable table handed to the rendering layer.
///
/// Names may repeat: common identifiers are injected before the flattened
/// intent and vendor flags after it. The rendering side must resolve
/// repeated names last-write-wins, which is what [`VariableTable::get`] and
/// [`VariableTable::resolved`] do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableTable {
    entries: Vec<Variable>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if REDACTED.contains(&name.as_str()) {
            tracing::trace!("{} : <redacted>", name);
        } else {
            tracing::trace!("{} : {}", name, value);
        }
        self.entries.push(Variable { name, value });
    }

    /// Emit a vendor flag in capitalized `True`/`False` form
    pub fn add_flag(&mut self, name: impl Into<String>, enabled: bool) {
        self.add(name, if enabled { "True" } else { "False" });
    }

    /// Emit `value`, or the `"None"` sentinel the templates test against
    pub fn add_or_none(&mut self, name: impl Into<String>, value: Option<String>) {
        self.add(name, value.unwrap_or_else(|| "None".to_string()));
    }

    /// Last value written for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|v| v.name == name)
    }

    /// Number of times `name` was written
    pub fn count(&self, name: &str) -> usize {
        self.entries.iter().filter(|v| v.name == name).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deduplicated view: first-seen order, last-written value.
    pub fn resolved(&self) -> Vec<Variable> {
        let mut out: Vec<Variable> = Vec::with_capacity(self.entries.len());
        for var in &self.entries {
            match out.iter_mut().find(|v| v.name == var.name) {
                Some(existing) => existing.value = var.value.clone(),
                None => out.push(var.clone()),
            }
        }
        out
    }
}

impl Extend<Variable> for VariableTable {
    fn extend<T: IntoIterator<Item = Variable>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for VariableTable {
    type Item = Variable;
    type IntoIter = std::vec::IntoIter<Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
