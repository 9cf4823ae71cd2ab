//! Category handlers: listing and questions per category.

use crate::error::AppError;
use crate::model::category_map;
use crate::response::{success_ok, CategoriesBody, QuestionList};
use crate::state::AppState;
use axum::extract::{Path, State};

/// GET /categories: id → type for every category.
pub async fn list_categories(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let categories = state.store.list_categories().await?;
    if categories.is_empty() {
        return Err(AppError::NotFound("no categories".into()));
    }
    Ok(success_ok(CategoriesBody {
        categories: category_map(&categories),
    }))
}

/// GET /categories/:category_id/questions
pub async fn questions_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id: i64 = category_id
        .parse()
        .map_err(|_| AppError::NotFound(format!("category '{}'", category_id)))?;
    if !state.store.category_exists(id).await? {
        return Err(AppError::NotFound(format!("category {}", id)));
    }
    let questions = state.store.questions_in_category(id).await?;
    tracing::debug!(category = id, count = questions.len(), "questions by category");
    Ok(success_ok(QuestionList::new(questions, Some(id))))
}
