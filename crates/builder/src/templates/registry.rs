//! Group template registry
//!
//! Templates are immutable blueprints kept apart from the canvas: saving
//! captures only the shape of the selected fields (kind + label), and
//! every instantiation stamps out an independent group with fresh field
//! ids and factory defaults.

use log::debug;

use contracts::schema::{
    create_element, Element, FieldElement, GroupElement, GroupTemplate, TemplateField,
};
use contracts::shared::{OpError, OpResult};

use crate::store::FormStore;

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<GroupTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Saved templates, oldest first
    pub fn templates(&self) -> &[GroupTemplate] {
        &self.templates
    }

    pub fn get(&self, template_id: &str) -> Option<&GroupTemplate> {
        self.templates
            .iter()
            .find(|t| t.template_id == template_id)
    }

    /// Capture a template from the pending group fields and immediately
    /// instantiate one group onto the canvas. Rejected without any effect
    /// when the trimmed name is blank or there are no fields: no template
    /// is stored and nothing reaches the canvas.
    pub fn save_template(
        &mut self,
        store: &mut FormStore,
        name: &str,
        fields: &[FieldElement],
    ) -> OpResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OpError::validation("template name is required"));
        }
        if fields.is_empty() {
            return Err(OpError::validation("template has no fields"));
        }

        let template = GroupTemplate::new(
            name,
            fields
                .iter()
                .map(|field| TemplateField {
                    id: field.id.clone(),
                    kind: field.kind,
                    label: field.label.clone(),
                })
                .collect(),
        );
        let template_id = template.template_id.clone();
        debug!(
            "template: saved \"{}\" ({}, {} field(s))",
            name,
            template_id,
            template.fields.len()
        );
        self.templates.push(template);

        // saving always yields one usable instance on the canvas
        self.instantiate(store, &template_id)?;
        Ok(template_id)
    }

    /// Stamp a new group out of a template. The group and each of its
    /// fields get fresh ids; validation, defaults and helper texts are
    /// reset to kind defaults. The template itself is never touched.
    pub fn instantiate(&self, store: &mut FormStore, template_id: &str) -> OpResult<String> {
        let Some(template) = self.get(template_id) else {
            return Err(OpError::not_found(format!(
                "template {} not found",
                template_id
            )));
        };

        let fields = template
            .fields
            .iter()
            .map(|shape| {
                // blank id: the store assigns a generated one on add
                let mut field = create_element("", shape.kind);
                field.label = shape.label.clone();
                field
            })
            .collect();

        let group_id = store.add_element(Element::Group(GroupElement {
            id: String::new(),
            name: template.name.clone(),
            fields,
            conditional: Vec::new(),
        }));
        debug!(
            "template: instantiated \"{}\" as group {}",
            template.name, group_id
        );
        Ok(group_id)
    }
}
