use crate::data::{StudentDraft, StudentId, StudentRecord};
use async_trait::async_trait;
use reqwest::StatusCode;
use snafu::Snafu;
use std::fmt::Debug;

pub mod http;
#[cfg(test)]
pub mod testing;

pub use http::HttpStudentApi;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ApiError {
    #[snafu(display("Unable to reach the students API"))]
    Transport { source: reqwest::Error },
    ///the API answered, but not with a 2xx. `body` is `Null` when it wasn't JSON
    #[snafu(display("Students API responded with {}", status))]
    Status {
        status: StatusCode,
        body: serde_json::Value,
    },
    #[snafu(display("Unable to decode students API response"))]
    Decode { source: reqwest::Error },
}

impl ApiError {
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait]
pub trait StudentApi: Debug + Send + Sync {
    async fn fetch_by_id(&self, id: &StudentId) -> ApiResult<StudentRecord>;
    async fn create(&self, draft: &StudentDraft) -> ApiResult<StudentRecord>;
    async fn update(&self, id: &StudentId, record: &StudentRecord) -> ApiResult<StudentRecord>;
}
