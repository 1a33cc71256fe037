use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::element::{ChoiceOption, FieldDefault, GroupElement, FieldElement, OptionsDirection};
use super::validation::ValidationRules;

/// Partial update of an element: only the present entries are merged.
/// `id` and `kind` are deliberately absent: editor operations can never
/// change them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementPatch {
    /// Field label
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
    /// Group name
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub helper_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<FieldDefault>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub options: Option<Vec<ChoiceOption>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub direction: Option<OptionsDirection>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub validation: Option<ValidationRules>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub conditional: Option<Vec<Condition>>,
}

impl ElementPatch {
    /// Patch that only replaces the label
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Patch that only replaces the condition list
    pub fn conditional(conditions: Vec<Condition>) -> Self {
        Self {
            conditional: Some(conditions),
            ..Self::default()
        }
    }

    /// Merge into a field. Group-only entries (`name`) are ignored.
    pub fn apply_to_field(&self, field: &mut FieldElement) {
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        if let Some(placeholder) = &self.placeholder {
            field.placeholder = Some(placeholder.clone());
        }
        if let Some(helper_text) = &self.helper_text {
            field.helper_text = helper_text.clone();
        }
        if let Some(default) = &self.default {
            field.default = default.clone();
        }
        if let Some(options) = &self.options {
            field.options = options.clone();
        }
        if let Some(read_only) = self.read_only {
            field.read_only = read_only;
        }
        if let Some(disabled) = self.disabled {
            field.disabled = disabled;
        }
        if let Some(rows) = self.rows {
            field.rows = Some(rows);
        }
        if let Some(format) = &self.format {
            field.format = Some(format.clone());
        }
        if let Some(direction) = self.direction {
            field.direction = Some(direction);
        }
        if let Some(validation) = &self.validation {
            field.validation = validation.clone();
        }
        if let Some(conditional) = &self.conditional {
            field.conditional = conditional.clone();
        }
    }

    /// Merge into a group. Field-only entries are ignored.
    pub fn apply_to_group(&self, group: &mut GroupElement) {
        if let Some(name) = &self.name {
            group.name = name.clone();
        }
        if let Some(conditional) = &self.conditional {
            group.conditional = conditional.clone();
        }
    }
}
