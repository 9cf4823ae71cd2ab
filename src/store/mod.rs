//! Storage seam. Handlers only ever see `dyn TriviaStore`; the server picks PostgreSQL
//! or the in-process store at startup.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::config::StoreKind;
use crate::error::AppError;
use crate::model::{Category, NewQuestion, Question};
use async_trait::async_trait;

#[async_trait]
pub trait TriviaStore: Send + Sync {
    fn kind(&self) -> StoreKind;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    /// All categories ordered by id.
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;

    async fn category_exists(&self, id: i64) -> Result<bool, AppError>;

    async fn insert_category(&self, kind: &str) -> Result<Category, AppError>;

    /// All questions ordered by id.
    async fn list_questions(&self) -> Result<Vec<Question>, AppError>;

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, AppError>;

    /// Case-insensitive substring match on question text, ordered by id.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, AppError>;

    /// Returns the new id. Unknown category is `AppError::Conflict`.
    async fn insert_question(&self, new: &NewQuestion) -> Result<i64, AppError>;

    /// Returns false when no row had that id.
    async fn delete_question(&self, id: i64) -> Result<bool, AppError>;

    /// Questions not in `exclude`, optionally restricted to one category, ordered by id.
    async fn quiz_pool(&self, category: Option<i64>, exclude: &[i64]) -> Result<Vec<Question>, AppError>;
}
