//! Canonical form state: elements, identifiers, runtime values

pub mod allocator;
pub mod form_store;
pub mod value_store;

pub use allocator::IdAllocator;
pub use form_store::{FormStore, Located};
pub use value_store::ValueStore;
