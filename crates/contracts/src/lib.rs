//! Shared contracts for the form builder: the schema data model and the
//! operation result types exchanged between the engine and its consumers.

pub mod schema;
pub mod shared;
