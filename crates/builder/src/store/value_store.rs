use std::collections::HashMap;

use serde_json::Value;

/// Runtime field values, keyed by element id. Kept separate from the
/// schema itself: a value survives label or validation edits and is
/// dropped together with its element.
#[derive(Clone, Debug, Default)]
pub struct ValueStore {
    values: HashMap<String, Value>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Get the current value for a field
    pub fn value(&self, field_id: &str) -> Option<&Value> {
        self.values.get(field_id)
    }

    /// Set the current value for a field
    pub fn set_value(&mut self, field_id: String, value: Value) {
        self.values.insert(field_id, value);
    }

    /// Remove the value for a field
    pub fn remove_value(&mut self, field_id: &str) {
        self.values.remove(field_id);
    }

    /// Clear all values
    pub fn clear_all(&mut self) {
        self.values.clear();
    }
}
