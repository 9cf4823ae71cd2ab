//! Rows of the two trivia tables and the insert payload.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
}

/// Validated body of `POST /questions`.
#[derive(Clone, Debug, PartialEq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: i64,
}

/// id → display name, ordered by id. Serializes as a JSON object with string keys.
pub fn category_map(categories: &[Category]) -> BTreeMap<i64, String> {
    categories.iter().map(|c| (c.id, c.kind.clone())).collect()
}
