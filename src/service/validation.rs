//! Request body validation: turns loosely-typed JSON bodies into typed requests.

use crate::error::AppError;
use crate::model::NewQuestion;
use crate::service::quiz::{QuizRequest, QuizScope, ALL_CATEGORIES};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    Text,
    /// JSON integer or a string holding one; the trivia frontend sends form values as strings.
    Integer,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn required(name: &'static str, kind: FieldKind) -> FieldRule {
    FieldRule {
        name,
        kind,
        required: true,
    }
}

pub const NEW_QUESTION_RULES: &[FieldRule] = &[
    required("question", FieldKind::Text),
    required("answer", FieldKind::Text),
    required("difficulty", FieldKind::Integer),
    required("category", FieldKind::Integer),
];

pub const SEARCH_RULES: &[FieldRule] = &[required("searchTerm", FieldKind::Text)];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against per-field rules. All required fields must be present and non-null.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        for rule in rules {
            match body.get(rule.name) {
                None | Some(Value::Null) if rule.required => {
                    return Err(AppError::Validation(format!("{} is required", rule.name)));
                }
                None | Some(Value::Null) => {}
                Some(v) => validate_field(rule, v)?,
            }
        }
        Ok(())
    }

    pub fn new_question(body: Value) -> Result<NewQuestion, AppError> {
        let body = body_to_map(body)?;
        Self::validate(&body, NEW_QUESTION_RULES)?;
        let difficulty = integer_field(&body, "difficulty")?;
        Ok(NewQuestion {
            question: text_field(&body, "question")?,
            answer: text_field(&body, "answer")?,
            difficulty: i32::try_from(difficulty)
                .map_err(|_| AppError::Validation("difficulty is out of range".into()))?,
            category: integer_field(&body, "category")?,
        })
    }

    /// Returns the search term. An empty term is allowed and matches everything.
    pub fn search(body: Value) -> Result<String, AppError> {
        let body = body_to_map(body)?;
        Self::validate(&body, SEARCH_RULES)?;
        text_field(&body, "searchTerm")
    }

    pub fn quiz(body: Value) -> Result<QuizRequest, AppError> {
        let body = body_to_map(body)?;
        let category = match body.get("quiz_category") {
            None | Some(Value::Null) => return Err(AppError::Validation("quiz_category is required".into())),
            Some(Value::Object(m)) => m,
            Some(_) => return Err(AppError::Validation("quiz_category must be an object".into())),
        };
        let previous = match body.get("previous_questions") {
            None | Some(Value::Null) => {
                return Err(AppError::Validation("previous_questions is required".into()));
            }
            Some(Value::Array(items)) => items,
            Some(_) => return Err(AppError::Validation("previous_questions must be an array".into())),
        };
        let previous_questions = previous
            .iter()
            .map(|v| as_integer(v).ok_or_else(|| AppError::Validation("previous_questions must hold question ids".into())))
            .collect::<Result<Vec<_>, _>>()?;

        let kind = category
            .get("type")
            .filter(|v| !v.is_null())
            .ok_or_else(|| AppError::Validation("quiz_category.type is required".into()))?;
        let scope = if kind.as_str() == Some(ALL_CATEGORIES) {
            QuizScope::All
        } else {
            let id = category
                .get("id")
                .and_then(as_integer)
                .ok_or_else(|| AppError::Validation("quiz_category.id must be a category id".into()))?;
            QuizScope::Category(id)
        };
        Ok(QuizRequest {
            scope,
            previous_questions,
        })
    }
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn validate_field(rule: &FieldRule, v: &Value) -> Result<(), AppError> {
    let ok = match rule.kind {
        FieldKind::Text => v.is_string(),
        FieldKind::Integer => as_integer(v).is_some(),
    };
    if ok {
        return Ok(());
    }
    let expected = match rule.kind {
        FieldKind::Text => "a string",
        FieldKind::Integer => "an integer",
    };
    Err(AppError::Validation(format!("{} must be {}", rule.name, expected)))
}

fn text_field(body: &Map<String, Value>, name: &str) -> Result<String, AppError> {
    body.get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| AppError::Validation(format!("{} must be a string", name)))
}

fn integer_field(body: &Map<String, Value>, name: &str) -> Result<i64, AppError> {
    body.get(name)
        .and_then(as_integer)
        .ok_or_else(|| AppError::Validation(format!("{} must be an integer", name)))
}

/// Integer from a JSON number or a numeric string.
pub fn as_integer(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
