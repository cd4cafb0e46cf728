//! In-memory doubles for the model and insight store.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::insights::models::IndustryInsight;
use crate::insights::store::InsightStore;
use crate::llm_client::{InsightModel, LlmError};
use crate::store::StoreError;

/// Replays a fixed sequence of replies and counts invocations.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightModel for ScriptedModel {
    async fn generate_text(&self, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

#[derive(Default)]
pub struct MemoryInsightStore {
    rows: Mutex<HashMap<String, IndustryInsight>>,
    racing_row: Mutex<Option<IndustryInsight>>,
    creates: AtomicUsize,
    updates: AtomicUsize,
}

impl MemoryInsightStore {
    pub fn with_rows(rows: Vec<IndustryInsight>) -> Self {
        let store = Self::default();
        store
            .rows
            .lock()
            .unwrap()
            .extend(rows.into_iter().map(|r| (r.industry.clone(), r)));
        store
    }

    /// Simulates a concurrent writer that inserts `row` just before our next create.
    pub fn insert_before_next_create(&self, row: IndustryInsight) {
        *self.racing_row.lock().unwrap() = Some(row);
    }

    pub fn get(&self, industry: &str) -> Option<IndustryInsight> {
        self.rows.lock().unwrap().get(industry).cloned()
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightStore for MemoryInsightStore {
    async fn find_by_industry(&self, industry: &str) -> Result<Option<IndustryInsight>, StoreError> {
        Ok(self.get(industry))
    }

    async fn create(&self, insight: &IndustryInsight) -> Result<IndustryInsight, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(racing) = self.racing_row.lock().unwrap().take() {
            rows.insert(racing.industry.clone(), racing);
        }
        if rows.contains_key(&insight.industry) {
            return Err(StoreError::AlreadyExists("Industry insight".to_string()));
        }
        self.creates.fetch_add(1, Ordering::SeqCst);
        rows.insert(insight.industry.clone(), insight.clone());
        Ok(insight.clone())
    }

    async fn update(&self, insight: &IndustryInsight) -> Result<IndustryInsight, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&insight.industry) else {
            return Err(StoreError::NotFound("Industry insight".to_string()));
        };
        self.updates.fetch_add(1, Ordering::SeqCst);
        *row = insight.clone();
        Ok(insight.clone())
    }
}
