//! Application error types and handling

use crate::mail::MailError;
use crate::models::RelayResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const SEND_FAILED_MESSAGE: &str = "Error sending email";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Delivery error: {0}")]
    Delivery(#[from] MailError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MethodNotAllowed => {
                return (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, RelayResponse::message(msg)),
            AppError::InvalidBody(detail) => {
                tracing::warn!("Rejected malformed request body: {}", detail);
                (
                    StatusCode::BAD_REQUEST,
                    RelayResponse::message(INVALID_BODY_MESSAGE),
                )
            }
            AppError::Delivery(err) => {
                tracing::error!("Error sending email: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RelayResponse::error(SEND_FAILED_MESSAGE, err.to_string()),
                )
            }
            AppError::IoError(err) => {
                tracing::error!("IO error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RelayResponse::message("Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
