//! Request validation, pagination and quiz picking; no I/O.

pub mod pagination;
pub mod quiz;
mod validation;
pub use validation::{as_integer, FieldKind, FieldRule, RequestValidator};
