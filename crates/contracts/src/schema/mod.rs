//! Form schema data model
//!
//! Everything a form is made of: typed field elements, one-level groups,
//! per-kind validation records, conditional-visibility rules, and the
//! reusable group templates they are instantiated from.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::schema::{create_element, FieldKind};
//!
//! let field = create_element("1", FieldKind::Email);
//! assert_eq!(field.label, "Email Address");
//! ```

mod condition;
mod element;
mod factory;
mod field_kind;
mod patch;
mod template;
mod validation;

pub use condition::{Condition, ConditionOp};
pub use element::{
    find_duplicate_option_value,
    ChoiceOption,
    Element,
    FieldDefault,
    FieldElement,
    GroupElement,
    OptionsDirection,
};
pub use factory::{create_element, create_element_by_name, default_validation};
pub use field_kind::FieldKind;
pub use patch::ElementPatch;
pub use template::{GroupTemplate, TemplateField};
pub use validation::ValidationRules;
