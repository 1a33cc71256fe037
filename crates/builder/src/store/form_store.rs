//! Canonical schema store
//!
//! Owns the ordered top-level element collection, the identifier
//! allocator, the selected-element pointer and the runtime values. Every
//! mutation either completes (repairing what it must, e.g. cascading
//! condition cleanup on delete) or refuses and leaves the store unchanged.

use std::collections::HashSet;

use log::{debug, warn};
use serde_json::Value;

use contracts::schema::{
    create_element, create_element_by_name, find_duplicate_option_value, Condition, Element,
    ElementPatch, FieldDefault, FieldElement, FieldKind, GroupElement,
};
use contracts::shared::{OpError, OpResult};

use crate::logic;

use super::allocator::IdAllocator;
use super::value_store::ValueStore;

/// Result of a deep lookup: where in the tree the element lives. Editors
/// use the nested variant to route updates to the owning group.
#[derive(Debug, Clone, Copy)]
pub enum Located<'a> {
    TopLevel(&'a Element),
    Nested {
        group: &'a GroupElement,
        field: &'a FieldElement,
    },
}

impl<'a> Located<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Located::TopLevel(element) => element.id(),
            Located::Nested { field, .. } => &field.id,
        }
    }

    pub fn display_label(&self) -> &'a str {
        match self {
            Located::TopLevel(element) => element.display_label(),
            Located::Nested { field, .. } => &field.label,
        }
    }

    pub fn conditional(&self) -> &'a [Condition] {
        match self {
            Located::TopLevel(element) => element.conditional(),
            Located::Nested { field, .. } => &field.conditional,
        }
    }

    /// The field itself, or None for a group
    pub fn as_field(&self) -> Option<&'a FieldElement> {
        match self {
            Located::TopLevel(element) => element.as_field(),
            Located::Nested { field, .. } => Some(field),
        }
    }

    /// The group that owns this element, when it is nested
    pub fn owning_group(&self) -> Option<&'a GroupElement> {
        match self {
            Located::TopLevel(_) => None,
            Located::Nested { group, .. } => Some(group),
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Located::Nested { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormStore {
    elements: Vec<Element>,
    allocator: IdAllocator,
    /// Weak reference: an id, never an owning link. Reset to None when the
    /// element it points at is deleted.
    selected_id: Option<String>,
    values: ValueStore,
}

impl FormStore {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            allocator: IdAllocator::new(),
            selected_id: None,
            values: ValueStore::new(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Ordered top-level elements
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Deep lookup across top-level elements and group fields
    pub fn find_by_id(&self, id: &str) -> Option<Located<'_>> {
        for element in &self.elements {
            match element {
                Element::Field(field) => {
                    if field.id == id {
                        return Some(Located::TopLevel(element));
                    }
                }
                Element::Group(group) => {
                    if group.id == id {
                        return Some(Located::TopLevel(element));
                    }
                    if let Some(field) = group.fields.iter().find(|f| f.id == id) {
                        return Some(Located::Nested { group, field });
                    }
                }
            }
        }
        None
    }

    /// Every element id in the schema, canvas order, nested fields included
    pub fn all_element_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for element in &self.elements {
            ids.push(element.id().to_string());
            if let Element::Group(group) = element {
                ids.extend(group.fields.iter().map(|f| f.id.clone()));
            }
        }
        ids
    }

    /// Every field in the schema, canvas order, nested fields included.
    /// Groups themselves are not fields and are not returned.
    pub fn all_fields(&self) -> Vec<&FieldElement> {
        let mut fields = Vec::new();
        for element in &self.elements {
            match element {
                Element::Field(field) => fields.push(field),
                Element::Group(group) => fields.extend(group.fields.iter()),
            }
        }
        fields
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append an element. A blank id is assigned by the store (sequential
    /// for the element, generated for blank nested field ids); a colliding
    /// id is replaced with a fresh one.
    pub fn add_element(&mut self, mut element: Element) -> String {
        match &mut element {
            Element::Field(field) => {
                field.id = self.admit_id(std::mem::take(&mut field.id));
            }
            Element::Group(group) => {
                group.id = self.admit_id(std::mem::take(&mut group.id));
                for field in &mut group.fields {
                    field.id = self.admit_nested_id(std::mem::take(&mut field.id));
                }
            }
        }
        let id = element.id().to_string();
        debug!(
            "add: {} \"{}\"",
            id,
            element.display_label()
        );
        self.elements.push(element);
        id
    }

    /// Create a default field of the given kind on the canvas
    pub fn add_field(&mut self, kind: FieldKind) -> String {
        let id = self.allocator.next_sequential();
        debug!("add: field {} ({})", id, kind.as_str());
        self.elements
            .push(Element::Field(create_element(id.clone(), kind)));
        id
    }

    /// Create a field from a palette type name; unknown names fall back to
    /// a generic field instead of failing
    pub fn add_field_by_name(&mut self, type_name: &str) -> String {
        let id = self.allocator.next_sequential();
        debug!("add: field {} (\"{}\")", id, type_name);
        self.elements
            .push(Element::Field(create_element_by_name(id.clone(), type_name)));
        id
    }

    /// Merge a patch into the element with the given id, wherever it lives.
    /// An unknown id is a logged no-op, not an error, since editors may
    /// race with deletions. Rejected without applying anything: duplicate option
    /// values, condition lists that would form a reference cycle.
    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> OpResult<()> {
        if self.find_by_id(id).is_none() {
            warn!("update: element {} not found, patch dropped", id);
            return Ok(());
        }
        if let Some(options) = &patch.options {
            if let Some(duplicate) = find_duplicate_option_value(options) {
                return Err(OpError::validation(format!(
                    "duplicate option value \"{}\"",
                    duplicate
                )));
            }
        }
        if let Some(conditions) = &patch.conditional {
            if logic::would_create_cycle(self, id, conditions) {
                return Err(OpError::cycle(format!(
                    "conditions of element {} would form a reference cycle",
                    id
                )));
            }
        }
        self.apply_patch(id, patch);
        Ok(())
    }

    /// Remove the element with the given id. A group takes all of its
    /// nested fields with it. Afterwards every condition anywhere in the
    /// schema that referenced a removed id is purged, removed values are
    /// dropped and a selection pointing at a removed id is cleared.
    pub fn delete_element(&mut self, id: &str) {
        let mut removed: HashSet<String> = HashSet::new();

        if let Some(index) = self.elements.iter().position(|el| el.id() == id) {
            let element = self.elements.remove(index);
            removed.insert(element.id().to_string());
            if let Element::Group(group) = &element {
                removed.extend(group.fields.iter().map(|f| f.id.clone()));
            }
        } else {
            let mut found = false;
            for element in &mut self.elements {
                if let Element::Group(group) = element {
                    if let Some(position) = group.fields.iter().position(|f| f.id == id) {
                        group.fields.remove(position);
                        removed.insert(id.to_string());
                        found = true;
                        break;
                    }
                }
            }
            if !found {
                warn!("delete: element {} not found", id);
                return;
            }
        }

        self.purge_removed(&removed);
    }

    /// Move a top-level element to a new position. Out-of-range indices
    /// are a logged no-op. Order inside groups is never affected.
    pub fn reorder_elements(&mut self, from: usize, to: usize) {
        let len = self.elements.len();
        if from >= len || to >= len {
            warn!("reorder: index out of range ({} -> {}, len {})", from, to, len);
            return;
        }
        if from == to {
            return;
        }
        let element = self.elements.remove(from);
        self.elements.insert(to, element);
        debug!("reorder: {} -> {}", from, to);
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn set_selected(&mut self, id: &str) {
        if self.find_by_id(id).is_none() {
            warn!("select: element {} not found", id);
            return;
        }
        self.selected_id = Some(id.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected(&self) -> Option<Located<'_>> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.find_by_id(id))
    }

    // ========================================================================
    // Runtime values
    // ========================================================================

    /// Set the current value of a field. Unknown ids and groups are a
    /// logged no-op.
    pub fn set_value(&mut self, id: &str, value: Value) {
        let is_field = self
            .find_by_id(id)
            .map(|located| located.as_field().is_some())
            .unwrap_or(false);
        if !is_field {
            warn!("set_value: field {} not found", id);
            return;
        }
        self.values.set_value(id.to_string(), value);
    }

    pub fn value(&self, id: &str) -> Option<&Value> {
        self.values.value(id)
    }

    /// Current value of a field: the runtime value when one was entered,
    /// the field's default otherwise. None for groups and unknown ids.
    pub fn effective_value(&self, id: &str) -> Option<Value> {
        let field = self.find_by_id(id)?.as_field()?;
        if let Some(value) = self.values.value(id) {
            return Some(value.clone());
        }
        Some(match &field.default {
            FieldDefault::Text { value } => Value::String(value.clone()),
            FieldDefault::Checked { checked } => Value::Bool(*checked),
            FieldDefault::Date { date } => match date {
                Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
                None => Value::Null,
            },
        })
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn admit_id(&mut self, id: String) -> String {
        if id.is_empty() {
            return self.allocator.next_sequential();
        }
        if self.allocator.reserve(&id) {
            return id;
        }
        let fresh = self.allocator.next_sequential();
        warn!("add: id {} already taken, reassigned to {}", id, fresh);
        fresh
    }

    fn admit_nested_id(&mut self, id: String) -> String {
        if id.is_empty() {
            return self.allocator.next_generated();
        }
        if self.allocator.reserve(&id) {
            return id;
        }
        let fresh = self.allocator.next_generated();
        warn!("add: nested id {} already taken, reassigned to {}", id, fresh);
        fresh
    }

    fn apply_patch(&mut self, id: &str, patch: &ElementPatch) {
        for element in &mut self.elements {
            match element {
                Element::Field(field) => {
                    if field.id == id {
                        patch.apply_to_field(field);
                        return;
                    }
                }
                Element::Group(group) => {
                    if group.id == id {
                        patch.apply_to_group(group);
                        return;
                    }
                    if let Some(field) = group.fields.iter_mut().find(|f| f.id == id) {
                        patch.apply_to_field(field);
                        return;
                    }
                }
            }
        }
    }

    fn purge_removed(&mut self, removed: &HashSet<String>) {
        let mut purged = 0usize;
        for element in &mut self.elements {
            {
                let conditional = element.conditional_mut();
                let before = conditional.len();
                conditional.retain(|c| !removed.contains(&c.field_id));
                purged += before - conditional.len();
            }
            if let Element::Group(group) = element {
                for field in &mut group.fields {
                    let before = field.conditional.len();
                    field.conditional.retain(|c| !removed.contains(&c.field_id));
                    purged += before - field.conditional.len();
                }
            }
        }
        for id in removed {
            self.values.remove_value(id);
        }
        if let Some(selected) = &self.selected_id {
            if removed.contains(selected) {
                self.selected_id = None;
            }
        }
        debug!(
            "delete: removed {} element(s), purged {} dangling condition(s)",
            removed.len(),
            purged
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::schema::{ConditionOp, ValidationRules};
    use serde_json::json;

    fn group_with_two_fields(store: &mut FormStore) -> (String, String, String) {
        let group = GroupElement {
            id: String::new(),
            name: "Контакты".to_string(),
            fields: vec![
                create_element("", FieldKind::ShortText),
                create_element("", FieldKind::Email),
            ],
            conditional: Vec::new(),
        };
        let group_id = store.add_element(Element::Group(group));
        let (first, second) = match store.find_by_id(&group_id) {
            Some(Located::TopLevel(Element::Group(group))) => {
                (group.fields[0].id.clone(), group.fields[1].id.clone())
            }
            _ => panic!("group not found"),
        };
        (group_id, first, second)
    }

    #[test]
    fn test_add_field_assigns_sequential_ids() {
        let mut store = FormStore::new();
        assert_eq!(store.add_field(FieldKind::ShortText), "1");
        assert_eq!(store.add_field(FieldKind::Email), "2");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_element_assigns_blank_ids() {
        let mut store = FormStore::new();
        let id = store.add_element(Element::Field(create_element("", FieldKind::Number)));
        assert_eq!(id, "1");

        let (group_id, first, second) = group_with_two_fields(&mut store);
        assert_eq!(group_id, "2");
        // nested fields get generated ids, not sequential ones
        assert!(first.contains('-'));
        assert!(second.contains('-'));
        assert_ne!(first, second);
    }

    #[test]
    fn test_add_element_repairs_colliding_id() {
        let mut store = FormStore::new();
        let first = store.add_field(FieldKind::ShortText);
        let second =
            store.add_element(Element::Field(create_element(first.clone(), FieldKind::Email)));
        assert_ne!(first, second);
        let ids = store.all_element_ids();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_ids_stay_unique_across_add_delete_sequences() {
        let mut store = FormStore::new();
        let mut seen = std::collections::HashSet::new();
        for round in 0..10 {
            let id = store.add_field(FieldKind::ShortText);
            assert!(seen.insert(id.clone()), "id {} reused", id);
            if round % 2 == 0 {
                store.delete_element(&id);
            }
        }
        let (_, first, second) = group_with_two_fields(&mut store);
        assert!(seen.insert(first));
        assert!(seen.insert(second));
    }

    #[test]
    fn test_update_top_level_label() {
        let mut store = FormStore::new();
        let id = store.add_field(FieldKind::ShortText);
        store
            .update_element(&id, &ElementPatch::label("Фамилия"))
            .unwrap();
        let located = store.find_by_id(&id).unwrap();
        assert_eq!(located.display_label(), "Фамилия");
    }

    #[test]
    fn test_update_nested_field_routes_through_group() {
        let mut store = FormStore::new();
        let (group_id, first, _) = group_with_two_fields(&mut store);
        store
            .update_element(&first, &ElementPatch::label("Город"))
            .unwrap();

        let located = store.find_by_id(&first).unwrap();
        assert!(located.is_nested());
        assert_eq!(located.owning_group().unwrap().id, group_id);
        assert_eq!(located.display_label(), "Город");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = FormStore::new();
        store.add_field(FieldKind::ShortText);
        let before = store.elements().to_vec();
        assert!(store
            .update_element("missing", &ElementPatch::label("x"))
            .is_ok());
        assert_eq!(store.elements(), &before[..]);
    }

    #[test]
    fn test_update_rejects_duplicate_option_values() {
        let mut store = FormStore::new();
        let id = store.add_field(FieldKind::DropDown);
        let patch = ElementPatch {
            options: Some(vec![
                contracts::schema::ChoiceOption::new("A", "same"),
                contracts::schema::ChoiceOption::new("B", "same"),
            ]),
            ..ElementPatch::default()
        };
        let err = store.update_element(&id, &patch).unwrap_err();
        assert!(err.is_code("VALIDATION_ERROR"));
        // nothing was applied
        let located = store.find_by_id(&id).unwrap();
        assert_eq!(located.as_field().unwrap().options[0].value, "a");
    }

    #[test]
    fn test_update_cannot_change_id_or_kind() {
        let mut store = FormStore::new();
        let id = store.add_field(FieldKind::Date);
        let patch = ElementPatch {
            label: Some("Дата доставки".to_string()),
            validation: Some(ValidationRules::date()),
            ..ElementPatch::default()
        };
        store.update_element(&id, &patch).unwrap();
        let field = store.find_by_id(&id).unwrap().as_field().unwrap().clone();
        assert_eq!(field.id, id);
        assert_eq!(field.kind, FieldKind::Date);
    }

    #[test]
    fn test_delete_purges_referencing_conditions() {
        let mut store = FormStore::new();
        let a = store.add_field(FieldKind::ShortText);
        let b = store.add_field(FieldKind::ShortText);
        store
            .update_element(
                &b,
                &ElementPatch::conditional(vec![Condition::new(
                    a.clone(),
                    ConditionOp::Eq,
                    json!("x"),
                )]),
            )
            .unwrap();

        store.delete_element(&a);

        assert!(store.find_by_id(&a).is_none());
        assert!(store.find_by_id(&b).unwrap().conditional().is_empty());
    }

    #[test]
    fn test_delete_group_cascades() {
        let mut store = FormStore::new();
        let outside = store.add_field(FieldKind::ShortText);
        let (group_id, first, second) = group_with_two_fields(&mut store);
        store
            .update_element(
                &outside,
                &ElementPatch::conditional(vec![Condition::new(
                    first.clone(),
                    ConditionOp::Eq,
                    json!("x"),
                )]),
            )
            .unwrap();
        store.set_value(&first, json!("x"));
        store.set_selected(&second);

        store.delete_element(&group_id);

        assert!(store.find_by_id(&group_id).is_none());
        assert!(store.find_by_id(&first).is_none());
        assert!(store.find_by_id(&second).is_none());
        // the condition referencing a removed nested field is gone
        assert!(store.find_by_id(&outside).unwrap().conditional().is_empty());
        // so are the value and the selection
        assert!(store.value(&first).is_none());
        assert!(store.selected_id().is_none());
    }

    #[test]
    fn test_delete_nested_field_only() {
        let mut store = FormStore::new();
        let (group_id, first, second) = group_with_two_fields(&mut store);
        store.delete_element(&first);

        assert!(store.find_by_id(&first).is_none());
        assert!(store.find_by_id(&second).is_some());
        let group = store
            .find_by_id(&group_id)
            .and_then(|l| match l {
                Located::TopLevel(Element::Group(g)) => Some(g.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(group.fields.len(), 1);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = FormStore::new();
        store.add_field(FieldKind::ShortText);
        store.delete_element("missing");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reorder_moves_first_to_last() {
        let mut store = FormStore::new();
        let a = store.add_field(FieldKind::ShortText);
        let b = store.add_field(FieldKind::Email);
        let c = store.add_field(FieldKind::Number);

        store.reorder_elements(0, 2);

        let order: Vec<&str> = store.elements().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![b.as_str(), c.as_str(), a.as_str()]);
    }

    #[test]
    fn test_reorder_leaves_nested_order_untouched() {
        let mut store = FormStore::new();
        store.add_field(FieldKind::ShortText);
        let (group_id, first, second) = group_with_two_fields(&mut store);
        store.add_field(FieldKind::Number);

        store.reorder_elements(1, 0);

        let group = store
            .find_by_id(&group_id)
            .and_then(|l| match l {
                Located::TopLevel(Element::Group(g)) => Some(g.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(group.fields[0].id, first);
        assert_eq!(group.fields[1].id, second);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut store = FormStore::new();
        let a = store.add_field(FieldKind::ShortText);
        store.reorder_elements(0, 5);
        assert_eq!(store.elements()[0].id(), a);
    }

    #[test]
    fn test_selection_is_a_weak_reference() {
        let mut store = FormStore::new();
        let id = store.add_field(FieldKind::ShortText);
        store.set_selected(&id);
        assert_eq!(store.selected().unwrap().id(), id);

        store.delete_element(&id);
        assert!(store.selected_id().is_none());
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_select_unknown_id_is_noop() {
        let mut store = FormStore::new();
        let id = store.add_field(FieldKind::ShortText);
        store.set_selected(&id);
        store.set_selected("missing");
        assert_eq!(store.selected_id(), Some(id.as_str()));
    }

    #[test]
    fn test_effective_value_falls_back_to_default() {
        let mut store = FormStore::new();
        let text = store.add_field(FieldKind::ShortText);
        let checkbox = store.add_field(FieldKind::Checkbox);

        assert_eq!(store.effective_value(&text), Some(json!("")));
        assert_eq!(store.effective_value(&checkbox), Some(json!(false)));

        store.set_value(&text, json!("hello"));
        assert_eq!(store.effective_value(&text), Some(json!("hello")));

        assert_eq!(store.effective_value("missing"), None);
    }

    #[test]
    fn test_set_value_on_group_is_noop() {
        let mut store = FormStore::new();
        let (group_id, ..) = group_with_two_fields(&mut store);
        store.set_value(&group_id, json!("x"));
        assert!(store.value(&group_id).is_none());
        assert_eq!(store.effective_value(&group_id), None);
    }
}
