//! Table DDL for the trivia schema and optional category seeding.

use crate::error::AppError;
use crate::store::TriviaStore;
use sqlx::PgPool;

/// Categories inserted by `seed_categories`, in id order.
pub const DEFAULT_CATEGORIES: [&str; 6] = ["Science", "Art", "Geography", "History", "Entertainment", "Sports"];

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id BIGSERIAL PRIMARY KEY,
        type TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS questions (
        id BIGSERIAL PRIMARY KEY,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        difficulty INTEGER NOT NULL,
        category BIGINT NOT NULL REFERENCES categories (id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS questions_category_idx ON questions (category)",
];

/// Create `categories` and `questions` if missing. Idempotent.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for sql in DDL {
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::debug!("trivia tables ensured");
    Ok(())
}

/// Insert the default categories when the table is empty. Returns how many were inserted.
pub async fn seed_categories(store: &dyn TriviaStore) -> Result<usize, AppError> {
    if !store.list_categories().await?.is_empty() {
        return Ok(0);
    }
    for kind in DEFAULT_CATEGORIES {
        store.insert_category(kind).await?;
    }
    tracing::info!(count = DEFAULT_CATEGORIES.len(), "seeded categories");
    Ok(DEFAULT_CATEGORIES.len())
}
