use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Visibility rule: the owning element is shown only if the referenced
/// field's current value satisfies `operator` against `value`.
///
/// An element's condition list is AND-combined: every condition must hold
/// for the element to be visible. An empty list means always visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Id of the referenced field, resolved against the whole schema
    pub field_id: String,
    pub operator: ConditionOp,
    /// Expected value to compare the referenced field's value against
    pub value: Value,
}

impl Condition {
    pub fn new(field_id: impl Into<String>, operator: ConditionOp, value: Value) -> Self {
        Self {
            field_id: field_id.into(),
            operator,
            value,
        }
    }

    /// Human-readable display text for condition lists in the editor
    pub fn describe(&self, field_label: &str) -> String {
        match self.operator {
            ConditionOp::Contains => {
                format!("{} содержит \"{}\"", field_label, value_text(&self.value))
            }
            op => format!("{} {} {}", field_label, op.symbol(), value_text(&self.value)),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Comparison operator of a condition. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOp {
    /// Equal (=)
    Eq,
    /// Not equal (!=)
    NotEq,
    /// Value contains the expected text / list contains the expected entry
    Contains,
    /// Greater than (>)
    Gt,
    /// Less than (<)
    Lt,
}

impl ConditionOp {
    /// Get display symbol for UI
    pub fn symbol(&self) -> &'static str {
        match self {
            ConditionOp::Eq => "=",
            ConditionOp::NotEq => "≠",
            ConditionOp::Contains => "~",
            ConditionOp::Gt => ">",
            ConditionOp::Lt => "<",
        }
    }

    /// Get display label for UI
    pub fn label(&self) -> &'static str {
        match self {
            ConditionOp::Eq => "равно",
            ConditionOp::NotEq => "не равно",
            ConditionOp::Contains => "содержит",
            ConditionOp::Gt => "больше",
            ConditionOp::Lt => "меньше",
        }
    }

    /// Get all available operators
    pub fn all() -> &'static [ConditionOp] {
        &[
            ConditionOp::Eq,
            ConditionOp::NotEq,
            ConditionOp::Contains,
            ConditionOp::Gt,
            ConditionOp::Lt,
        ]
    }
}
