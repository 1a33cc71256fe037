//! Types shared by every operation surface

pub mod op_result;

pub use op_result::{OpError, OpResult};
