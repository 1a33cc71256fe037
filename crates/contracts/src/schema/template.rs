use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field_kind::FieldKind;

/// Многоразовый шаблон группы полей. Неизменяемый чертёж: хранит только
/// форму полей (kind + label), без валидации и значений по умолчанию.
/// Инстанцированные группы живут в схеме, а шаблон только в реестре.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTemplate {
    /// Generated independently of element ids; never appears in the schema
    pub template_id: String,
    pub name: String,
    pub fields: Vec<TemplateField>,
    pub created_at: DateTime<Utc>,
}

impl GroupTemplate {
    pub fn new(name: impl Into<String>, fields: Vec<TemplateField>) -> Self {
        Self {
            template_id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            fields,
            created_at: Utc::now(),
        }
    }
}

/// Shape of one templated field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateField {
    /// Id of the source field the template was captured from
    pub id: String,
    pub kind: FieldKind,
    pub label: String,
}
