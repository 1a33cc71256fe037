//! Validation rules for form fields

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validation record of a field, shaped by kind family. Every variant is
/// structurally complete: a field always carries the full record for its
/// kind, never a partial one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationRules {
    /// ShortText / Email / TextArea
    Text {
        required: bool,
        min_length: Option<usize>,
        max_length: Option<usize>,
        pattern: String,
        custom_message: String,
    },
    /// Number
    Number {
        required: bool,
        min: Option<f64>,
        max: Option<f64>,
        custom_message: String,
    },
    /// Date
    Date {
        required: bool,
        min_date: Option<NaiveDate>,
        max_date: Option<NaiveDate>,
        custom_message: String,
    },
    /// RadioGroup / DropDown / Checkbox
    Choice {
        required: bool,
        custom_message: String,
    },
}

impl ValidationRules {
    /// Text rules without constraints
    pub fn text() -> Self {
        Self::Text {
            required: false,
            min_length: None,
            max_length: None,
            pattern: String::new(),
            custom_message: String::new(),
        }
    }

    /// Text rules with a format pattern
    pub fn text_with_pattern(pattern: impl Into<String>) -> Self {
        Self::Text {
            required: false,
            min_length: None,
            max_length: None,
            pattern: pattern.into(),
            custom_message: String::new(),
        }
    }

    /// Number rules without bounds
    pub fn number() -> Self {
        Self::Number {
            required: false,
            min: None,
            max: None,
            custom_message: String::new(),
        }
    }

    /// Date rules without bounds
    pub fn date() -> Self {
        Self::Date {
            required: false,
            min_date: None,
            max_date: None,
            custom_message: String::new(),
        }
    }

    /// Choice rules
    pub fn choice() -> Self {
        Self::Choice {
            required: false,
            custom_message: String::new(),
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            Self::Text { required, .. }
            | Self::Number { required, .. }
            | Self::Date { required, .. }
            | Self::Choice { required, .. } => *required,
        }
    }

    pub fn set_required(&mut self, value: bool) {
        match self {
            Self::Text { required, .. }
            | Self::Number { required, .. }
            | Self::Date { required, .. }
            | Self::Choice { required, .. } => *required = value,
        }
    }

    pub fn custom_message(&self) -> &str {
        match self {
            Self::Text { custom_message, .. }
            | Self::Number { custom_message, .. }
            | Self::Date { custom_message, .. }
            | Self::Choice { custom_message, .. } => custom_message,
        }
    }

    /// Validate a runtime value against the rules. The custom message, when
    /// set, replaces the default one.
    pub fn validate(&self, value: &Value, field_label: &str) -> Result<(), String> {
        match self {
            Self::Text {
                required,
                min_length,
                max_length,
                pattern,
                ..
            } => {
                let text = value.as_str().unwrap_or_default();
                if *required && text.trim().is_empty() {
                    return Err(self.message(format!("{} не может быть пустым", field_label)));
                }
                if let Some(min) = min_length {
                    if !text.is_empty() && text.chars().count() < *min {
                        return Err(self.message(format!(
                            "{} должен содержать минимум {} символов",
                            field_label, min
                        )));
                    }
                }
                if let Some(max) = max_length {
                    if text.chars().count() > *max {
                        return Err(self.message(format!(
                            "{} не должен превышать {} символов",
                            field_label, max
                        )));
                    }
                }
                // TODO: enforce `pattern` once the regex crate is pulled in
                let _ = pattern;
                Ok(())
            }
            Self::Number { required, min, max, .. } => {
                let number = match value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
                    _ => None,
                };
                let Some(number) = number else {
                    if *required {
                        return Err(self.message(format!("{} не может быть пустым", field_label)));
                    }
                    return Ok(());
                };
                if let Some(min) = min {
                    if number < *min {
                        return Err(self.message(format!(
                            "{} должен быть не менее {}",
                            field_label, min
                        )));
                    }
                }
                if let Some(max) = max {
                    if number > *max {
                        return Err(self.message(format!(
                            "{} должен быть не более {}",
                            field_label, max
                        )));
                    }
                }
                Ok(())
            }
            Self::Date {
                required,
                min_date,
                max_date,
                ..
            } => {
                let date = value
                    .as_str()
                    .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
                let Some(date) = date else {
                    if *required {
                        return Err(self.message(format!("{} не может быть пустым", field_label)));
                    }
                    return Ok(());
                };
                if let Some(min) = min_date {
                    if date < *min {
                        return Err(self.message(format!(
                            "{} должна быть не раньше {}",
                            field_label, min
                        )));
                    }
                }
                if let Some(max) = max_date {
                    if date > *max {
                        return Err(self.message(format!(
                            "{} должна быть не позже {}",
                            field_label, max
                        )));
                    }
                }
                Ok(())
            }
            Self::Choice { required, .. } => {
                let empty = match value {
                    Value::Null => true,
                    Value::String(s) => s.trim().is_empty(),
                    Value::Bool(checked) => !checked,
                    Value::Array(items) => items.is_empty(),
                    _ => false,
                };
                if *required && empty {
                    return Err(self.message(format!("{} не может быть пустым", field_label)));
                }
                Ok(())
            }
        }
    }

    fn message(&self, default: String) -> String {
        let custom = self.custom_message();
        if custom.is_empty() {
            default
        } else {
            custom.to_string()
        }
    }
}
