//! Shared application state for all routes.

use crate::config::Settings;
use crate::store::TriviaStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TriviaStore>,
    pub questions_per_page: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn TriviaStore>, settings: &Settings) -> Self {
        AppState {
            store,
            questions_per_page: settings.questions_per_page,
        }
    }
}
