//! Facade over the store, template registry and logic engine
//!
//! The surface the presentation layer talks to. Every operation is
//! synchronous and atomic from the caller's perspective; visibility is
//! recomputed from current state on every query, so it can never go
//! stale.

use std::collections::HashMap;

use serde_json::Value;

use contracts::schema::{Element, ElementPatch, FieldElement, FieldKind, GroupTemplate};
use contracts::shared::OpResult;

use crate::logic::{self, FieldRef, Visibility};
use crate::store::{FormStore, Located};
use crate::templates::TemplateRegistry;

#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    store: FormStore,
    registry: TemplateRegistry,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self {
            store: FormStore::new(),
            registry: TemplateRegistry::new(),
        }
    }

    // ========================================================================
    // Canvas mutations
    // ========================================================================

    /// Add a default field of the given kind to the end of the canvas
    pub fn add_element(&mut self, kind: FieldKind) -> String {
        self.store.add_field(kind)
    }

    /// Add a field by palette type name (unknown names fall back to a
    /// generic field)
    pub fn add_element_by_name(&mut self, type_name: &str) -> String {
        self.store.add_field_by_name(type_name)
    }

    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> OpResult<()> {
        self.store.update_element(id, patch)
    }

    pub fn delete_element(&mut self, id: &str) {
        self.store.delete_element(id)
    }

    pub fn reorder_elements(&mut self, from: usize, to: usize) {
        self.store.reorder_elements(from, to)
    }

    pub fn set_value(&mut self, id: &str, value: Value) {
        self.store.set_value(id, value)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn set_selected(&mut self, id: &str) {
        self.store.set_selected(id)
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection()
    }

    pub fn selected(&self) -> Option<Located<'_>> {
        self.store.selected()
    }

    // ========================================================================
    // Group templates
    // ========================================================================

    /// Save a reusable template and put one instance of it on the canvas
    pub fn save_group_template(&mut self, name: &str, fields: &[FieldElement]) -> OpResult<String> {
        self.registry.save_template(&mut self.store, name, fields)
    }

    /// Stamp another instance of a saved template onto the canvas
    pub fn instantiate_group(&mut self, template_id: &str) -> OpResult<String> {
        self.registry.instantiate(&mut self.store, template_id)
    }

    pub fn templates(&self) -> &[GroupTemplate] {
        self.registry.templates()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn elements(&self) -> &[Element] {
        self.store.elements()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Located<'_>> {
        self.store.find_by_id(id)
    }

    pub fn visibility(&self, id: &str) -> Visibility {
        logic::visibility_of(&self.store, id)
    }

    pub fn visibility_map(&self) -> HashMap<String, Visibility> {
        logic::evaluate(&self.store)
    }

    pub fn available_reference_fields(&self, element_id: &str) -> Vec<FieldRef> {
        logic::available_reference_fields(&self.store, element_id)
    }

    /// Direct access for advanced callers
    pub fn store(&self) -> &FormStore {
        &self.store
    }
}
