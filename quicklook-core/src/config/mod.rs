//! Site configuration schema.

pub mod schema;

pub use schema::*;
