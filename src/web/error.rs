use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Unprocessable request: {0}")]
    Unprocessable(String),
    #[error("validation error")]
    Validation(ValidationErrors),
    #[error("Not found: `{0}`")]
    NotFound(String),
    #[error("{0}")]
    Registry(#[from] crate::Error),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.body()) {
            Ok(body) => {
                let status = self.status_code();
                let header = [("content-type", "application/json")];
                (status, header, body).into_response()
            }
            Err(err) => {
                error!("{:#?}", err);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let header = [("content-type", "text/plain")];
                (status, header, format!("{err}")).into_response()
            }
        }
    }
}

impl HttpError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Body {
        Body {
            message: format!("{self}"),
            errors: self.field_errors(),
        }
    }

    fn field_errors(&self) -> Vec<FieldErrors> {
        let Self::Validation(errors) = self else {
            return vec![];
        };

        let mut contents: Vec<FieldErrors> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| FieldErrors {
                field: field.to_string(),
                messages: errs.iter().map(message).collect(),
            })
            .collect();

        contents.sort_by(|a, b| a.field.cmp(&b.field));
        contents
    }
}

fn message(err: &validator::ValidationError) -> String {
    if err.code == "required" {
        return err.code.to_string();
    }

    match err.message.as_ref() {
        Some(message) => message.to_string(),
        None => "Invalid value".to_string(),
    }
}

#[derive(Debug, Serialize)]
struct Body {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldErrors>,
}

#[derive(Debug, Serialize)]
struct FieldErrors {
    field: String,
    messages: Vec<String>,
}
