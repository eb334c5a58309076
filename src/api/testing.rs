use crate::{
    api::{ApiError, ApiResult, StudentApi},
    data::{StudentDraft, StudentId, StudentRecord},
    state::EditorState,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

/// In-memory students API. Failures queued with [`FakeStudentApi::fail_next`] are handed out
/// to the next calls, in order, whatever the operation. [`FakeStudentApi::with_delay`] makes
/// every call take a while, so concurrent callers overlap.
#[derive(Debug, Default)]
pub struct FakeStudentApi {
    records: Mutex<HashMap<StudentId, StudentRecord>>,
    failures: Mutex<VecDeque<(StatusCode, serde_json::Value)>>,
    fetches: AtomicUsize,
    creates: AtomicUsize,
    updates: AtomicUsize,
    delay: Option<Duration>,
}

impl FakeStudentApi {
    pub fn with_record(self, record: StudentRecord) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fail_next(&self, status: StatusCode, body: serde_json::Value) {
        self.failures.lock().unwrap().push_back((status, body));
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn stored(&self, id: &StudentId) -> Option<StudentRecord> {
        self.records.lock().unwrap().get(id).cloned()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn scripted_failure(&self) -> ApiResult<()> {
        match self.failures.lock().unwrap().pop_front() {
            Some((status, body)) => Err(ApiError::Status { status, body }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StudentApi for FakeStudentApi {
    async fn fetch_by_id(&self, id: &StudentId) -> ApiResult<StudentRecord> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.scripted_failure()?;

        self.stored(id).ok_or(ApiError::Status {
            status: StatusCode::NOT_FOUND,
            body: serde_json::json!({}),
        })
    }

    async fn create(&self, draft: &StudentDraft) -> ApiResult<StudentRecord> {
        let n = self.creates.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.scripted_failure()?;

        let record = StudentRecord {
            id: StudentId::new(format!("new-{n}")),
            fields: draft.clone(),
        };
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: &StudentId, record: &StudentRecord) -> ApiResult<StudentRecord> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.scripted_failure()?;

        let stored = StudentRecord {
            id: id.clone(),
            fields: record.fields.clone(),
        };
        self.records
            .lock()
            .unwrap()
            .insert(id.clone(), stored.clone());
        Ok(stored)
    }
}

pub fn state_with(api: &Arc<FakeStudentApi>) -> EditorState {
    EditorState::with_api(api.clone(), Duration::from_secs(10))
}
