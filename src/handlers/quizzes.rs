//! Quiz play handler.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::response::{success_ok, QuizBody};
use crate::service::quiz::pick;
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::extract::State;
use serde_json::Value;

/// POST /quizzes: one random question not asked yet, or `question: null` when none remain.
pub async fn next_question(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let request = RequestValidator::quiz(body)?;
    let pool = state
        .store
        .quiz_pool(request.scope.category(), &request.previous_questions)
        .await?;
    let question = pick(&pool, &mut rand::thread_rng()).cloned();
    tracing::debug!(
        scope = ?request.scope,
        asked = request.previous_questions.len(),
        remaining = pool.len(),
        "quiz question"
    );
    Ok(success_ok(QuizBody { question }))
}
