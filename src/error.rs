use crate::{
    api::ApiError,
    data::{StudentId, student::UnknownGenderError},
};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;
use uuid::Uuid;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EditorError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse cache freshness window in seconds"))]
    ParseStaleTime { source: ParseIntError },
    #[snafu(display("Unable to build HTTP client for the students API"))]
    BuildHttpClient { source: reqwest::Error },
    #[snafu(display("{:?} is not a student editor route", path))]
    NotAnEditorRoute { path: String },
    #[snafu(display("Unable to find student editor {}", view))]
    MissingEditor { view: Uuid },
    #[snafu(display("Unable to load student {}", id))]
    LoadStudent { source: ApiError, id: StudentId },
    #[snafu(display("Invalid gender"))]
    InvalidGender { source: UnknownGenderError },
}

impl IntoResponse for EditorError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const BG: StatusCode = StatusCode::BAD_GATEWAY; //upstream api broke

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Student Editor Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } | Self::ParseStaleTime { .. } => ISE,
            Self::BuildHttpClient { .. } => ISE,
            Self::NotAnEditorRoute { .. } => NF,
            Self::MissingEditor { .. } => NF,
            Self::LoadStudent { source, .. } => match source.status() {
                Some(StatusCode::NOT_FOUND) => NF,
                _ => BG,
            },
            Self::InvalidGender { .. } => BI,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}
