//! Conditional logic engine
//!
//! A pure pass over current store state: no state of its own, safe to
//! recompute on every change. An element is visible iff its condition
//! list is empty or every condition holds (AND). A condition fails closed
//! whenever its reference cannot be resolved to a visible field's value:
//! a dangling id, a group reference, a hidden dependency, or a persisted
//! cycle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use contracts::schema::{Condition, ConditionOp};

use crate::store::FormStore;

/// Dependency chains longer than this are treated as unsatisfiable.
/// Practical schemas are nowhere near; the cap only backstops cycles that
/// slipped past edit-time rejection.
const MAX_DEPTH: usize = 32;

/// Visibility decision for one element. Initial state is Visible: an
/// element with no conditions is always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// Referenceable field offered by the condition picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub id: String,
    pub label: String,
}

enum EvalState {
    InProgress,
    Done(bool),
}

/// Visibility of every element in the schema, nested fields included
pub fn evaluate(store: &FormStore) -> HashMap<String, Visibility> {
    let mut memo: HashMap<String, EvalState> = HashMap::new();
    let mut map = HashMap::new();
    for id in store.all_element_ids() {
        let visible = is_visible(store, &id, &mut memo, 0);
        map.insert(
            id,
            if visible {
                Visibility::Visible
            } else {
                Visibility::Hidden
            },
        );
    }
    map
}

/// Visibility of a single element. Unknown ids are Hidden (fail-closed).
pub fn visibility_of(store: &FormStore, id: &str) -> Visibility {
    let mut memo = HashMap::new();
    if is_visible(store, id, &mut memo, 0) {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

/// Fields the given element may reference in its own conditions: every
/// field in the schema except the element itself and except fields whose
/// own condition chain already depends on it (referencing those would
/// close a cycle). Groups carry no value and are never offered.
pub fn available_reference_fields(store: &FormStore, element_id: &str) -> Vec<FieldRef> {
    store
        .all_fields()
        .into_iter()
        .filter(|field| field.id != element_id)
        .filter(|field| !depends_on(store, &field.id, element_id))
        .map(|field| FieldRef {
            id: field.id.clone(),
            label: field.label.clone(),
        })
        .collect()
}

/// Would installing `conditions` on `element_id` create a reference
/// cycle? True when a condition points at the element itself or at a
/// field that already (transitively) depends on it.
pub fn would_create_cycle(store: &FormStore, element_id: &str, conditions: &[Condition]) -> bool {
    conditions
        .iter()
        .any(|c| c.field_id == element_id || depends_on(store, &c.field_id, element_id))
}

/// Does `from` depend on `target` through currently persisted conditions?
fn depends_on(store: &FormStore, from: &str, target: &str) -> bool {
    let mut visited: Vec<String> = Vec::new();
    let mut stack = vec![from.to_string()];
    while let Some(current) = stack.pop() {
        if current == target {
            return true;
        }
        if visited.iter().any(|seen| *seen == current) {
            continue;
        }
        visited.push(current.clone());
        if let Some(located) = store.find_by_id(&current) {
            stack.extend(located.conditional().iter().map(|c| c.field_id.clone()));
        }
    }
    false
}

fn is_visible(
    store: &FormStore,
    id: &str,
    memo: &mut HashMap<String, EvalState>,
    depth: usize,
) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    match memo.get(id) {
        // re-entry means a persisted cycle: fail closed
        Some(EvalState::InProgress) => return false,
        Some(EvalState::Done(visible)) => return *visible,
        None => {}
    }
    let Some(located) = store.find_by_id(id) else {
        return false;
    };
    memo.insert(id.to_string(), EvalState::InProgress);
    let conditions = located.conditional().to_vec();
    let visible = conditions
        .iter()
        .all(|condition| condition_holds(store, condition, memo, depth + 1));
    memo.insert(id.to_string(), EvalState::Done(visible));
    visible
}

fn condition_holds(
    store: &FormStore,
    condition: &Condition,
    memo: &mut HashMap<String, EvalState>,
    depth: usize,
) -> bool {
    let Some(located) = store.find_by_id(&condition.field_id) else {
        // referenced field was deleted or never existed
        return false;
    };
    if located.as_field().is_none() {
        // groups carry no comparable value
        return false;
    }
    // a hidden field contributes no value
    if !is_visible(store, &condition.field_id, memo, depth) {
        return false;
    }
    let Some(actual) = store.effective_value(&condition.field_id) else {
        return false;
    };
    operator_matches(condition.operator, &actual, &condition.value)
}

fn operator_matches(operator: ConditionOp, actual: &Value, expected: &Value) -> bool {
    match operator {
        ConditionOp::Eq => values_equal(actual, expected),
        ConditionOp::NotEq => !values_equal(actual, expected),
        ConditionOp::Contains => match (actual, expected) {
            (Value::String(haystack), Value::String(needle)) => haystack.contains(needle),
            (Value::Array(items), needle) => items.contains(needle),
            _ => false,
        },
        ConditionOp::Gt => match (as_number(actual), as_number(expected)) {
            (Some(left), Some(right)) => left > right,
            _ => false,
        },
        ConditionOp::Lt => match (as_number(actual), as_number(expected)) {
            (Some(left), Some(right)) => left < right,
            _ => false,
        },
    }
}

/// Equality with form semantics: numeric when both sides are numeric,
/// canonical-text comparison otherwise (so "1" entered in a text input
/// still matches the number 1 configured in the editor).
fn values_equal(actual: &Value, expected: &Value) -> bool {
    if let (Some(left), Some(right)) = (as_number(actual), as_number(expected)) {
        return left == right;
    }
    canonical_text(actual) == canonical_text(expected)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn canonical_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
