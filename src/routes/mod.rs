//! Route tables.

mod common;
mod trivia;

pub use common::common_routes;
pub use trivia::{app, cors_layer, trivia_routes};
pub(crate) use trivia::BODY_LIMIT_BYTES;
