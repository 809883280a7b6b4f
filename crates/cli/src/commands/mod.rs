//! Command implementations.
//!
//! Each command owns its CLI args and execution logic.

mod demo;
mod validate;

pub use demo::Demo;
pub use validate::Validate;
