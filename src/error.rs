use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::books::StoreError;
use crate::templates;

// Each error kind decides its own HTTP shape here; handlers just use `?`.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    Validation(String),
    Internal(anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Html(templates::not_found_page())).into_response()
            }
            AppError::Validation(constraint) => {
                (StatusCode::UNPROCESSABLE_ENTITY, constraint).into_response()
            }
            AppError::Internal(err) => {
                tracing::error!("request failed: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Something went wrong: {err}"),
                )
                    .into_response()
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::Validation(e) => Self::Validation(e.to_string()),
            // multiple matches and database faults stay server-side
            other => Self::Internal(other.into()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.into())
    }
}
