use anyhow::anyhow;
use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::captcha::handlers::TokenRequest;
use crate::contact::deobfuscate_email;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RevealResponse {
    pub email: String,
}

/// POST /api/v1/contact/reveal
/// Returns the plain contact address once the CAPTCHA token checks out.
pub async fn reveal_email(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RevealResponse>, AppError> {
    let token = TokenRequest::token_from(&body)
        .ok_or_else(|| AppError::Validation("Token is required".to_string()))?;

    let verifier = state
        .captcha
        .as_ref()
        .ok_or_else(|| AppError::Internal(anyhow!("RECAPTCHA_SECRET_KEY is not set")))?;

    let verification = verifier
        .verify(&token)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    if !verification.success {
        return Err(AppError::Forbidden);
    }

    let email = deobfuscate_email(&state.resume.personal.email)
        .map_err(|e| AppError::Internal(e.into()))?;
    info!(score = ?verification.score, "Contact address revealed");
    Ok(Json(RevealResponse { email }))
}
