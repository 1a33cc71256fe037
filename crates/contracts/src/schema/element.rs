use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::field_kind::FieldKind;
use super::validation::ValidationRules;

/// A node on the form canvas: either a single field or a group of fields.
///
/// Groups nest exactly one level deep: `GroupElement::fields` holds
/// `FieldElement`s, so a group inside a group is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum Element {
    Field(FieldElement),
    Group(GroupElement),
}

impl Element {
    pub fn id(&self) -> &str {
        match self {
            Element::Field(field) => &field.id,
            Element::Group(group) => &group.id,
        }
    }

    /// Display text: a field's label or a group's name
    pub fn display_label(&self) -> &str {
        match self {
            Element::Field(field) => &field.label,
            Element::Group(group) => &group.name,
        }
    }

    pub fn conditional(&self) -> &[Condition] {
        match self {
            Element::Field(field) => &field.conditional,
            Element::Group(group) => &group.conditional,
        }
    }

    pub fn conditional_mut(&mut self) -> &mut Vec<Condition> {
        match self {
            Element::Field(field) => &mut field.conditional,
            Element::Group(group) => &mut group.conditional,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Element::Group(_))
    }

    pub fn as_field(&self) -> Option<&FieldElement> {
        match self {
            Element::Field(field) => Some(field),
            Element::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupElement> {
        match self {
            Element::Group(group) => Some(group),
            Element::Field(_) => None,
        }
    }
}

/// A single form field with its full editable configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldElement {
    /// Unique identifier across the whole schema, nested fields included
    pub id: String,
    pub kind: FieldKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub placeholder: Option<String>,
    pub default: FieldDefault,
    #[serde(default)]
    pub helper_text: String,
    /// Choice list for kinds that carry one; option values must be unique
    /// within the element
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub disabled: bool,
    /// Visible rows, TextArea only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rows: Option<u32>,
    /// Display format, Date only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub format: Option<String>,
    /// Options layout, RadioGroup only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub direction: Option<OptionsDirection>,
    pub validation: ValidationRules,
    #[serde(default)]
    pub conditional: Vec<Condition>,
}

/// A container of fields, shown and reordered as one unit on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupElement {
    pub id: String,
    pub name: String,
    pub fields: Vec<FieldElement>,
    #[serde(default)]
    pub conditional: Vec<Condition>,
}

/// Default value of a field, shaped by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDefault {
    /// Text-like, number and choice kinds: prefilled text (or option value)
    Text { value: String },
    /// Checkbox: prechecked state
    Checked { checked: bool },
    /// Date: prefilled date, if any
    Date { date: Option<NaiveDate> },
}

/// One entry of a RadioGroup/DropDown choice list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Layout of a RadioGroup's options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionsDirection {
    Vertical,
    Horizontal,
}

impl OptionsDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

/// First option value that appears more than once, if any
pub fn find_duplicate_option_value(options: &[ChoiceOption]) -> Option<&str> {
    for (i, option) in options.iter().enumerate() {
        if options[..i].iter().any(|other| other.value == option.value) {
            return Some(&option.value);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_duplicate_option_value() {
        let unique = vec![ChoiceOption::new("A", "a"), ChoiceOption::new("B", "b")];
        assert_eq!(find_duplicate_option_value(&unique), None);

        let dup = vec![
            ChoiceOption::new("A", "a"),
            ChoiceOption::new("B", "b"),
            ChoiceOption::new("Also A", "a"),
        ];
        assert_eq!(find_duplicate_option_value(&dup), Some("a"));
    }

    #[test]
    fn test_display_label() {
        let group = Element::Group(GroupElement {
            id: "1".to_string(),
            name: "Address".to_string(),
            fields: Vec::new(),
            conditional: Vec::new(),
        });
        assert_eq!(group.display_label(), "Address");
        assert!(group.is_group());
        assert!(group.as_field().is_none());
    }
}
