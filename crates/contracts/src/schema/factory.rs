//! Default instances for every field kind
//!
//! The factory is the single place that knows what a freshly dropped field
//! looks like: label, placeholder, helper text, options and a structurally
//! complete validation record for the kind.

use super::element::{ChoiceOption, FieldDefault, FieldElement, OptionsDirection};
use super::field_kind::FieldKind;
use super::validation::ValidationRules;

const EMAIL_PATTERN: &str = r"\S+@\S+\.\S+";

/// Create a fully populated default field of the given kind. Pure and
/// deterministic: same id and kind, same element.
pub fn create_element(id: impl Into<String>, kind: FieldKind) -> FieldElement {
    let mut element = FieldElement {
        id: id.into(),
        kind,
        label: String::new(),
        placeholder: None,
        default: FieldDefault::Text {
            value: String::new(),
        },
        helper_text: String::new(),
        options: Vec::new(),
        read_only: false,
        disabled: false,
        rows: None,
        format: None,
        direction: None,
        validation: default_validation(kind),
        conditional: Vec::new(),
    };

    match kind {
        FieldKind::ShortText => {
            element.label = "Short Text Field".to_string();
            element.placeholder = Some("Enter text...".to_string());
        }
        FieldKind::Email => {
            element.label = "Email Address".to_string();
            element.placeholder = Some("name@example.com".to_string());
            element.helper_text = "We'll never share your email.".to_string();
        }
        FieldKind::Number => {
            element.label = "Number Input".to_string();
            element.placeholder = Some("0".to_string());
        }
        FieldKind::RadioGroup => {
            element.label = "Choose one option".to_string();
            element.direction = Some(OptionsDirection::Vertical);
            element.options = vec![
                ChoiceOption::new("Option 1", "1"),
                ChoiceOption::new("Option 2", "2"),
            ];
        }
        FieldKind::Checkbox => {
            element.label = "I agree to the terms".to_string();
            element.default = FieldDefault::Checked { checked: false };
        }
        FieldKind::Date => {
            element.label = "Select Date".to_string();
            element.default = FieldDefault::Date { date: None };
            element.format = Some("YYYY-MM-DD".to_string());
        }
        FieldKind::DropDown => {
            element.label = "Select an option".to_string();
            element.placeholder = Some("Choose...".to_string());
            element.options = vec![
                ChoiceOption::new("Option A", "a"),
                ChoiceOption::new("Option B", "b"),
            ];
        }
        FieldKind::TextArea => {
            element.label = "Long Text".to_string();
            element.placeholder = Some("Enter your message...".to_string());
            element.rows = Some(4);
        }
    }

    element
}

/// Create a field from a palette type name. Unknown names never fail: they
/// degrade to a bare text field labelled "<name> Field" so the canvas can
/// accept any palette entry.
pub fn create_element_by_name(id: impl Into<String>, type_name: &str) -> FieldElement {
    match FieldKind::parse(type_name) {
        Some(kind) => create_element(id, kind),
        None => {
            let mut element = create_element(id, FieldKind::ShortText);
            element.label = format!("{} Field", type_name);
            element.placeholder = None;
            element
        }
    }
}

/// Structurally complete validation record for the kind
pub fn default_validation(kind: FieldKind) -> ValidationRules {
    match kind {
        FieldKind::ShortText | FieldKind::TextArea => ValidationRules::text(),
        FieldKind::Email => ValidationRules::text_with_pattern(EMAIL_PATTERN),
        FieldKind::Number => ValidationRules::number(),
        FieldKind::Date => ValidationRules::date(),
        FieldKind::RadioGroup | FieldKind::Checkbox | FieldKind::DropDown => {
            ValidationRules::choice()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_complete_for_every_kind() {
        for kind in FieldKind::all() {
            let element = create_element("1", *kind);
            let matches_kind = match element.validation {
                ValidationRules::Text { .. } => kind.is_text_like(),
                ValidationRules::Number { .. } => *kind == FieldKind::Number,
                ValidationRules::Date { .. } => *kind == FieldKind::Date,
                ValidationRules::Choice { .. } => kind.is_choice(),
            };
            assert!(matches_kind, "validation shape mismatch for {:?}", kind);
            assert!(!element.validation.is_required());
        }
    }

    #[test]
    fn test_factory_is_deterministic() {
        assert_eq!(
            create_element("7", FieldKind::Date),
            create_element("7", FieldKind::Date)
        );
    }

    #[test]
    fn test_short_text_defaults() {
        let element = create_element("1", FieldKind::ShortText);
        assert_eq!(element.label, "Short Text Field");
        assert_eq!(element.placeholder.as_deref(), Some("Enter text..."));
        assert_eq!(
            element.default,
            FieldDefault::Text {
                value: String::new()
            }
        );
        assert!(element.conditional.is_empty());
    }

    #[test]
    fn test_email_carries_pattern() {
        let element = create_element("1", FieldKind::Email);
        assert_eq!(element.helper_text, "We'll never share your email.");
        match element.validation {
            ValidationRules::Text { pattern, .. } => assert_eq!(pattern, EMAIL_PATTERN),
            other => panic!("unexpected validation: {:?}", other),
        }
    }

    #[test]
    fn test_choice_kinds_carry_options() {
        let radio = create_element("1", FieldKind::RadioGroup);
        assert_eq!(radio.options.len(), 2);
        assert_eq!(radio.direction, Some(OptionsDirection::Vertical));

        let dropdown = create_element("2", FieldKind::DropDown);
        assert_eq!(dropdown.options[0].value, "a");

        let checkbox = create_element("3", FieldKind::Checkbox);
        assert_eq!(checkbox.default, FieldDefault::Checked { checked: false });
        assert!(checkbox.options.is_empty());
    }

    #[test]
    fn test_text_area_rows() {
        let element = create_element("1", FieldKind::TextArea);
        assert_eq!(element.rows, Some(4));
    }

    #[test]
    fn test_by_name_known_kind() {
        let element = create_element_by_name("1", "Radio Group");
        assert_eq!(element.kind, FieldKind::RadioGroup);
    }

    #[test]
    fn test_by_name_unknown_falls_back() {
        let element = create_element_by_name("1", "Signature");
        assert_eq!(element.label, "Signature Field");
        assert_eq!(element.kind, FieldKind::ShortText);
        assert!(matches!(element.validation, ValidationRules::Text { .. }));
    }
}
