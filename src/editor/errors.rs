use crate::{api::ApiError, data::StudentField};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet(BTreeMap<StudentField, String>);

impl ValidationErrorSet {
    pub fn get(&self, field: StudentField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }
}

impl FromIterator<(StudentField, String)> for ValidationErrorSet {
    fn from_iter<I: IntoIterator<Item = (StudentField, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Deserialize)]
struct UnprocessableBody {
    error: HashMap<String, Value>,
}

///only a 422 carries field errors, under `error`
pub fn derive_field_errors(failure: Option<&ApiError>) -> Option<ValidationErrorSet> {
    let Some(ApiError::Status { status, body }) = failure else {
        return None;
    };
    if *status != StatusCode::UNPROCESSABLE_ENTITY {
        return None;
    }

    let UnprocessableBody { error } = match UnprocessableBody::deserialize(body) {
        Ok(b) => b,
        Err(e) => {
            warn!(?e, ?body, "422 from students API without a usable error object");
            return None;
        }
    };

    Some(
        error
            .into_iter()
            .filter_map(|(name, message)| {
                let Ok(field) = name.parse::<StudentField>() else {
                    debug!(?name, "ignoring error for unknown field");
                    return None;
                };
                let message = match message {
                    Value::String(message) => message,
                    other => other.to_string(),
                };
                Some((field, message))
            })
            .collect(),
    )
}
