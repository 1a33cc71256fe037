//! Reusable group templates

pub mod registry;

pub use registry::TemplateRegistry;
