//! Trivia API: REST backend for a trivia game over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Settings, StoreKind};
pub use error::{AppError, ConfigError};
pub use migration::{ensure_tables, seed_categories};
pub use model::{Category, NewQuestion, Question};
pub use routes::{app, common_routes, trivia_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, TriviaStore};
