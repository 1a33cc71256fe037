//! Field kind enumeration

use serde::{Deserialize, Serialize};

/// Kind of a form field. Closed set; a group is not a field kind but a
/// separate element variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    ShortText,
    Email,
    Number,
    RadioGroup,
    Checkbox,
    Date,
    DropDown,
    TextArea,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortText => "short_text",
            Self::Email => "email",
            Self::Number => "number",
            Self::RadioGroup => "radio_group",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::DropDown => "drop_down",
            Self::TextArea => "text_area",
        }
    }

    /// Human-readable name as shown in the element palette
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ShortText => "Short Text",
            Self::Email => "Email",
            Self::Number => "Number",
            Self::RadioGroup => "Radio Group",
            Self::Checkbox => "Checkbox",
            Self::Date => "Date",
            Self::DropDown => "DropDown",
            Self::TextArea => "Text Area",
        }
    }

    /// Parse a kind from either the palette name ("Short Text") or the
    /// serialized name ("short_text"). Returns None for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .find(|kind| kind.display_name() == s || kind.as_str() == s)
            .copied()
    }

    /// Get all available field kinds, in palette order
    pub fn all() -> &'static [FieldKind] {
        &[
            FieldKind::ShortText,
            FieldKind::Email,
            FieldKind::Number,
            FieldKind::RadioGroup,
            FieldKind::Checkbox,
            FieldKind::Date,
            FieldKind::DropDown,
            FieldKind::TextArea,
        ]
    }

    /// Kinds whose value is free text (shared validation shape)
    pub fn is_text_like(&self) -> bool {
        matches!(self, Self::ShortText | Self::Email | Self::TextArea)
    }

    /// Kinds whose value is one of a fixed choice set
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::RadioGroup | Self::Checkbox | Self::DropDown)
    }

    /// Kinds that carry an options list
    pub fn has_options(&self) -> bool {
        matches!(self, Self::RadioGroup | Self::DropDown)
    }
}
