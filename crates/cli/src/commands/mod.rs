//! Command implementations.

pub mod check;
pub mod resources;
pub mod schema;
