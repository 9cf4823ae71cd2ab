//! PostgreSQL store over a `PgPool`.

use super::TriviaStore;
use crate::config::StoreKind;
use crate::error::{AppError, ConfigError};
use crate::model::{Category, NewQuestion, Question};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn fetch_questions(&self, sql: &str) -> Result<Vec<Question>, AppError> {
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Question>(sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

#[async_trait]
impl TriviaStore for PgStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Postgres
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn category_exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn insert_category(&self, kind: &str) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, Category>("INSERT INTO categories (type) VALUES ($1) RETURNING id, type")
            .bind(kind)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        self.fetch_questions(&format!("SELECT {} FROM questions ORDER BY id", QUESTION_COLUMNS))
            .await
    }

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, AppError> {
        let sql = format!("SELECT {} FROM questions WHERE category = $1 ORDER BY id", QUESTION_COLUMNS);
        tracing::debug!(sql = %sql, category, "query");
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, AppError> {
        let sql = format!("SELECT {} FROM questions WHERE question ILIKE $1 ORDER BY id", QUESTION_COLUMNS);
        let pattern = format!("%{}%", escape_like(term));
        tracing::debug!(sql = %sql, pattern = %pattern, "query");
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert_question(&self, new: &NewQuestion) -> Result<i64, AppError> {
        let result: Result<(i64,), sqlx::Error> = sqlx::query_as(
            "INSERT INTO questions (question, answer, difficulty, category) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&new.question)
        .bind(&new.answer)
        .bind(new.difficulty)
        .bind(new.category)
        .fetch_one(&self.pool)
        .await;
        match result {
            Ok((id,)) => Ok(id),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => Err(AppError::Conflict(format!(
                "category {} does not exist",
                new.category
            ))),
            Err(e) => Err(AppError::Db(e)),
        }
    }

    async fn delete_question(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn quiz_pool(&self, category: Option<i64>, exclude: &[i64]) -> Result<Vec<Question>, AppError> {
        let sql = format!(
            "SELECT {} FROM questions WHERE NOT (id = ANY($1)) AND ($2::BIGINT IS NULL OR category = $2) ORDER BY id",
            QUESTION_COLUMNS
        );
        tracing::debug!(sql = %sql, ?category, excluded = exclude.len(), "query");
        let rows = sqlx::query_as::<_, Question>(&sql)
            .bind(exclude)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// Escape LIKE wildcards so the search term matches literally (backslash is the default escape).
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|_| invalid_database_url(database_url))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| invalid_database_url(url))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn invalid_database_url(url: &str) -> AppError {
    AppError::Config(ConfigError::InvalidValue {
        key: "DATABASE_URL",
        value: url.to_string(),
    })
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
