//! Quiz question picking.

use crate::model::Question;
use rand::Rng;

/// `quiz_category.type` sent by the trivia frontend when the player chose "ALL".
pub const ALL_CATEGORIES: &str = "click";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl QuizScope {
    pub fn category(&self) -> Option<i64> {
        match self {
            QuizScope::All => None,
            QuizScope::Category(id) => Some(*id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizRequest {
    pub scope: QuizScope,
    pub previous_questions: Vec<i64>,
}

/// Uniform pick from the pool. `None` means the quiz is over.
pub fn pick<'a, R>(pool: &'a [Question], rng: &mut R) -> Option<&'a Question>
where
    R: Rng,
{
    if pool.is_empty() {
        return None;
    }
    pool.get(rng.gen_range(0..pool.len()))
}
