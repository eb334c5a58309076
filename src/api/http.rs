use crate::{
    api::{ApiResult, DecodeSnafu, StatusSnafu, StudentApi, TransportSnafu},
    data::{StudentDraft, StudentId, StudentRecord},
};
use async_trait::async_trait;
use reqwest::{
    Client, Response,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use snafu::ResultExt;

#[derive(Debug, Clone)]
pub struct HttpStudentApi {
    client: Client,
    base_url: String,
}

impl HttpStudentApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    fn students_url(&self) -> String {
        format!("{}/students", self.base_url)
    }

    fn student_url(&self, id: &StudentId) -> String {
        format!("{}/students/{id}", self.base_url)
    }

    async fn read<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.context(DecodeSnafu);
        }

        let bytes = response.bytes().await.context(TransportSnafu)?;
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        debug!(%status, ?body, "students API refused request");

        StatusSnafu { status, body }.fail()
    }
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn fetch_by_id(&self, id: &StudentId) -> ApiResult<StudentRecord> {
        let response = self
            .client
            .get(self.student_url(id))
            .send()
            .await
            .context(TransportSnafu)?;
        Self::read(response).await
    }

    async fn create(&self, draft: &StudentDraft) -> ApiResult<StudentRecord> {
        let response = self
            .client
            .post(self.students_url())
            .json(draft)
            .send()
            .await
            .context(TransportSnafu)?;
        Self::read(response).await
    }

    async fn update(&self, id: &StudentId, record: &StudentRecord) -> ApiResult<StudentRecord> {
        let response = self
            .client
            .put(self.student_url(id))
            .json(record)
            .send()
            .await
            .context(TransportSnafu)?;
        Self::read(response).await
    }
}
