/*
 * Responsibility
 * - /tan/verify handler (mounted with `any`, so the method check lives here)
 * - POST body -> VerificationRequest -> membership check against ValidTans
 * - 200 with an empty body when the tan is valid, otherwise ApiError
 */
use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    api::v1::dto::tan::VerificationRequest,
    error::{ApiError, VerifyError},
    state::AppState,
};

pub async fn verify_tan(
    State(state): State<AppState>,
    method: Method,
    req: Request,
) -> Result<StatusCode, Response> {
    let reject = |error| ApiError::new(error, state.status_mode).into_response();

    if method != Method::POST {
        return Err(reject(VerifyError::MethodNotAllowed));
    }

    // Buffered only for POST, so the body limit (413) never masks the method check
    let body = Bytes::from_request(req, &state)
        .await
        .map_err(IntoResponse::into_response)?;

    let request = VerificationRequest::decode(&body).map_err(|e| {
        tracing::warn!(error = %e, "malformed verification request body");
        reject(VerifyError::from(e))
    })?;

    tracing::info!(?request, "verification request");

    if state.valid_tans.contains(&request.tan) {
        Ok(StatusCode::OK)
    } else {
        Err(reject(VerifyError::WrongTan))
    }
}
