/*
 * Responsibility
 * - Per-request errors of the verify endpoint (VerifyError)
 * - IntoResponse (status code / text body), chosen by StatusMode
 */
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::StatusMode;

const INVALID_BODY_MESSAGE: &str = "invalid request body";

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Only POST is supported")]
    MethodNotAllowed,
    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("wrong tan")]
    WrongTan,
}

#[derive(Debug)]
pub struct ApiError {
    pub error: VerifyError,
    pub mode: StatusMode,
}

impl ApiError {
    pub fn new(error: VerifyError, mode: StatusMode) -> Self {
        Self { error, mode }
    }

    fn status(&self) -> StatusCode {
        match self.mode {
            StatusMode::Compat => StatusCode::NOT_FOUND,
            StatusMode::Rest => match self.error {
                VerifyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
                VerifyError::MalformedBody(_) => StatusCode::BAD_REQUEST,
                VerifyError::WrongTan => StatusCode::FORBIDDEN,
            },
        }
    }

    fn message(&self) -> String {
        match (&self.error, self.mode) {
            // Decoder details stay in the logs unless callers rely on them
            (VerifyError::MalformedBody(_), StatusMode::Rest) => INVALID_BODY_MESSAGE.to_string(),
            (e, _) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut res = (status, self.message()).into_response();

        if status == StatusCode::METHOD_NOT_ALLOWED {
            res.headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }

        res
    }
}
