use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::model::InputField;

pub type Result<T> = std::result::Result<T, EstimatorError>;

#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("invalid value {value} for {field}")]
    InvalidInput { field: InputField, value: f64 },

    #[error("an estimate is already being computed")]
    Busy,

    #[error("estimate task failed: {0}")]
    Task(String),

    #[error("unknown stress level: {0}")]
    UnknownLevel(String),

    #[error("malformed request body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for EstimatorError {
    fn status_code(&self) -> StatusCode {
        match self {
            EstimatorError::InvalidInput { .. } | EstimatorError::Body(_) => StatusCode::BAD_REQUEST,
            EstimatorError::UnknownLevel(_) => StatusCode::NOT_FOUND,
            EstimatorError::Busy => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
