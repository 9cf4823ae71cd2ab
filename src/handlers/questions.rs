//! Question handlers: paginated list, create, delete, search.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::category_map;
use crate::response::{success_ok, Created, Deleted, QuestionList, QuestionPage};
use crate::service::pagination::{page_param, paginate};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use serde_json::Value;
use std::collections::HashMap;

/// GET /questions?page=N
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let page = page_param(params.get("page").map(String::as_str));
    let questions = state.store.list_questions().await?;
    let current = paginate(&questions, page, state.questions_per_page);
    if current.is_empty() {
        return Err(AppError::NotFound(format!("page {}", page)));
    }
    let categories = state.store.list_categories().await?;
    Ok(success_ok(QuestionPage {
        questions: current.to_vec(),
        total_questions: questions.len(),
        current_category: None,
        categories: category_map(&categories),
    }))
}

/// POST /questions
pub async fn create_question(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let new = RequestValidator::new_question(body)?;
    let id = state.store.insert_question(&new).await?;
    tracing::info!(id, category = new.category, "question created");
    Ok(success_ok(Created { created: id }))
}

/// DELETE /questions/:question_id: a missing row is 422, not 404, as the frontend expects.
pub async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id: i64 = question_id
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid question id '{}'", question_id)))?;
    if !state.store.delete_question(id).await? {
        return Err(AppError::Unprocessable(format!("question {} does not exist", id)));
    }
    tracing::info!(id, "question deleted");
    Ok(success_ok(Deleted { deleted: id }))
}

/// POST /questions/search
pub async fn search_questions(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let term = RequestValidator::search(body)?;
    let questions = state.store.search_questions(&term).await?;
    tracing::debug!(term = %term, count = questions.len(), "search");
    Ok(success_ok(QuestionList::new(questions, None)))
}
