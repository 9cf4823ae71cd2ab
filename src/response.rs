//! Standard response envelope helpers. Every success body carries `"success": true`
//! next to the payload fields.

use crate::model::Question;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Serialize)]
pub struct CategoriesBody {
    pub categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<i64>,
    pub categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
pub struct QuestionList {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<i64>,
}

impl QuestionList {
    pub fn new(questions: Vec<Question>, current_category: Option<i64>) -> Self {
        let total_questions = questions.len();
        QuestionList {
            questions,
            total_questions,
            current_category,
        }
    }
}

#[derive(Serialize)]
pub struct Created {
    pub created: i64,
}

#[derive(Serialize)]
pub struct Deleted {
    pub deleted: i64,
}

#[derive(Serialize)]
pub struct QuizBody {
    /// `None` once the pool is exhausted.
    pub question: Option<Question>,
}

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<Success<T>>) {
    (StatusCode::OK, Json(Success { success: true, data }))
}
