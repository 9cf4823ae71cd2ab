//! In-process store: same contract as the PostgreSQL store, nothing persisted.

use super::TriviaStore;
use crate::config::StoreKind;
use crate::error::AppError;
use crate::model::{Category, NewQuestion, Question};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
    next_category_id: i64,
    next_question_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }

    fn select<F>(&self, keep: F) -> Vec<Question>
    where
        F: Fn(&Question) -> bool,
    {
        self.read().questions.values().filter(|q| keep(q)).cloned().collect()
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.read().categories.values().cloned().collect())
    }

    async fn category_exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.read().categories.contains_key(&id))
    }

    async fn insert_category(&self, kind: &str) -> Result<Category, AppError> {
        let mut tables = self.write();
        tables.next_category_id += 1;
        let category = Category {
            id: tables.next_category_id,
            kind: kind.to_string(),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        Ok(self.select(|_| true))
    }

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, AppError> {
        Ok(self.select(|q| q.category == category))
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, AppError> {
        let needle = term.to_lowercase();
        Ok(self.select(|q| q.question.to_lowercase().contains(&needle)))
    }

    async fn insert_question(&self, new: &NewQuestion) -> Result<i64, AppError> {
        let mut tables = self.write();
        if !tables.categories.contains_key(&new.category) {
            return Err(AppError::Conflict(format!("category {} does not exist", new.category)));
        }
        tables.next_question_id += 1;
        let id = tables.next_question_id;
        tables.questions.insert(
            id,
            Question {
                id,
                question: new.question.clone(),
                answer: new.answer.clone(),
                category: new.category,
                difficulty: new.difficulty,
            },
        );
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write().questions.remove(&id).is_some())
    }

    async fn quiz_pool(&self, category: Option<i64>, exclude: &[i64]) -> Result<Vec<Question>, AppError> {
        Ok(self.select(|q| !exclude.contains(&q.id) && category.map_or(true, |c| q.category == c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.into(),
            answer: "answer".into(),
            difficulty: 1,
            category,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order() {
        let store = MemoryStore::new();
        let science = store.insert_category("Science").await.unwrap();
        let art = store.insert_category("Art").await.unwrap();
        assert_eq!((science.id, art.id), (1, 2));

        let a = store.insert_question(&new_question("first", science.id)).await.unwrap();
        let b = store.insert_question(&new_question("second", art.id)).await.unwrap();
        assert!(a < b);
        let ids: Vec<i64> = store.list_questions().await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[tokio::test]
    async fn unknown_category_is_a_conflict() {
        let store = MemoryStore::new();
        let err = store.insert_question(&new_question("orphan", 42)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let store = MemoryStore::new();
        let c = store.insert_category("History").await.unwrap();
        store.insert_question(&new_question("Who built the Pyramids?", c.id)).await.unwrap();
        store.insert_question(&new_question("What year?", c.id)).await.unwrap();
        let hits = store.search_questions("PYRAMID").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].question, "Who built the Pyramids?");
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let store = MemoryStore::new();
        let c = store.insert_category("Art").await.unwrap();
        let id = store.insert_question(&new_question("q", c.id)).await.unwrap();
        assert!(store.delete_question(id).await.unwrap());
        assert!(!store.delete_question(id).await.unwrap());
    }

    #[tokio::test]
    async fn quiz_pool_filters_category_and_previous() {
        let store = MemoryStore::new();
        let a = store.insert_category("Science").await.unwrap();
        let b = store.insert_category("Sports").await.unwrap();
        let q1 = store.insert_question(&new_question("one", a.id)).await.unwrap();
        let q2 = store.insert_question(&new_question("two", a.id)).await.unwrap();
        let q3 = store.insert_question(&new_question("three", b.id)).await.unwrap();

        let all: Vec<i64> = store.quiz_pool(None, &[q2]).await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(all, vec![q1, q3]);
        let science: Vec<i64> = store.quiz_pool(Some(a.id), &[q1]).await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(science, vec![q2]);
    }
}
