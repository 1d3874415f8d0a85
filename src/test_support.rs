//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::state::ResultItem;
use crate::search::{PageRequest, ProviderError, ResultPage, SearchProvider};

/// A result with the given id and like count; other fields derived from the id.
pub fn item(id: &str, likes: u64) -> ResultItem {
    ResultItem {
        id: id.to_string(),
        alt_description: format!("alt {id}"),
        description: format!("photo {id}"),
        thumbnail_url: format!("https://images.test/{id}.jpg"),
        likes,
    }
}

/// A page of zero-like items with the given ids.
pub fn page_of(ids: &[&str], total: u64) -> ResultPage {
    ResultPage {
        results: ids.iter().map(|id| item(id, 0)).collect(),
        total,
    }
}

/// Replays canned outcomes in order and records every request it sees.
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Result<ResultPage, ProviderError>>>,
    requests: Mutex<Vec<(String, u32)>>,
}

impl ScriptedProvider {
    pub fn new(outcomes: Vec<Result<ResultPage, ProviderError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_page(&self, request: PageRequest<'_>) -> Result<ResultPage, ProviderError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.query.to_string(), request.page));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Network("script exhausted".into())))
    }
}
