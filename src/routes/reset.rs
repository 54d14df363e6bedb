use axum::Json;
use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::email;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Default, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "resetUrl")]
    pub reset_url: String,
}

#[derive(Serialize)]
pub struct ForgotPasswordResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub message: String,
}

/// Issue a reset token and mail the link. A body that does not decode as
/// `ForgotPasswordRequest` gets a 400, whatever its content type.
pub async fn forgot_password(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ForgotPasswordResponse>, AppError> {
    // `null` decodes to an empty request and fails on the field checks below.
    let req = serde_json::from_slice::<Option<ForgotPasswordRequest>>(&body)
        .map_err(|_| AppError::BadRequest("invalid request data".to_string()))?
        .unwrap_or_default();

    if req.email.is_empty() {
        return Err(AppError::BadRequest("email required".to_string()));
    }

    if req.reset_url.is_empty() {
        return Err(AppError::BadRequest("reset URL required".to_string()));
    }

    // Issued before sending: a failed send leaves a live token behind.
    let token = state.tokens.issue().await;

    tracing::info!("Sending password reset email to {}", req.email);
    tracing::debug!("Reset link: {}", email::reset_link(&req.reset_url, &token));

    let Some(mailer) = state.mailer.as_ref() else {
        tracing::warn!("SMTP not configured, cannot deliver reset link to {}", req.email);
        return Err(AppError::MailFailed("SMTP not configured".to_string()));
    };

    mailer
        .send_reset(&req.email, &token, &req.reset_url)
        .await
        .map_err(AppError::MailFailed)?;

    Ok(Json(ForgotPasswordResponse {
        success: true,
        message: "reset link sent".to_string(),
        reset_token: Some(token),
    }))
}

pub async fn forgot_password_options() -> StatusCode {
    StatusCode::OK
}

pub async fn validate_reset_token(
    State(state): State<SharedState>,
    RawQuery(query): RawQuery,
) -> Json<ValidateResponse> {
    let token = query
        .as_deref()
        .and_then(|q| {
            form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "token")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default();

    if token.is_empty() {
        return Json(ValidateResponse {
            valid: false,
            message: "invalid token".to_string(),
        });
    }

    let status = state.tokens.lookup(&token).await;
    Json(ValidateResponse {
        valid: status.is_valid(),
        message: status.message().to_string(),
    })
}

pub async fn post_only() -> AppError {
    AppError::MethodNotAllowed("only POST requests are supported".to_string())
}

pub async fn get_only() -> AppError {
    AppError::MethodNotAllowed("only GET requests are supported".to_string())
}
