//! Conditional visibility evaluation

pub mod engine;

pub use engine::{
    available_reference_fields, evaluate, visibility_of, would_create_cycle, FieldRef, Visibility,
};
