//! Error taxonomy shared by the business layer and the HTTP handlers.
//!
//! Every variant maps to exactly one HTTP status; the response body is the
//! same JSON envelope the success paths use (`success=false`).

use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};
use serde::Serialize;

#[derive(Debug, Display, Error)]
pub enum ApiError {
    /// Malformed or missing request fields, rejected before handler logic
    #[display("Validation failed")]
    Validation(#[error(not(source))] Vec<String>),
    /// Missing, invalid or expired credential
    #[display("{_0}")]
    Unauthorized(#[error(not(source))] String),
    /// Authenticated but not permitted to perform the operation
    #[display("{_0}")]
    Forbidden(#[error(not(source))] String),
    #[display("{_0}")]
    NotFound(#[error(not(source))] String),
    /// Business-rule violation (duplicate application, bad state transition, ...)
    #[display("{_0}")]
    Conflict(#[error(not(source))] String),
    /// Store or object-store failure; detail is logged, never sent to the caller
    #[display("Internal server error")]
    Dependency(#[error(not(source))] String),
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a Vec<String>>,
}

impl web::error::WebResponseError for ApiError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        if let ApiError::Dependency(detail) = self {
            error!("[Dependency] {detail}");
        }

        let errors = match self {
            ApiError::Validation(field_errors) => Some(field_errors),
            _ => None,
        };

        web::HttpResponse::build(self.status_code()).json(&ErrorEnvelope {
            success: false,
            message: self.to_string(),
            errors,
        })
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            ApiError::Validation(_) | ApiError::Conflict(_) => http::StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => http::StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => http::StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
            ApiError::Dependency(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Infrastructure errors (sqlx, S3, serialization) fall through as 500s
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Dependency(format!("{err:#}"))
    }
}

impl ApiError {
    pub fn validation(msg: &str) -> Self {
        ApiError::Validation(vec![msg.to_string()])
    }
}
