use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use crate::state::AppState;

/// Request body shared by the relay and the contact reveal.
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub token: Option<String>,
}

impl TokenRequest {
    /// Lenient parse: an absent, empty or malformed body yields no token.
    pub fn token_from(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<TokenRequest>(body)
            .ok()
            .and_then(|r| r.token)
            .filter(|t| !t.is_empty())
    }
}

/// POST /api/verify-recaptcha
///
/// Relays the token to the verification service. The response shapes are
/// consumed by the front end as-is; they intentionally bypass `AppError`.
pub async fn verify_recaptcha(State(state): State<AppState>, body: Bytes) -> Response {
    let Some(token) = TokenRequest::token_from(&body) else {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Token is required" }))).into_response();
    };

    let Some(verifier) = state.captcha.as_ref() else {
        error!("RECAPTCHA_SECRET_KEY is not set");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Server configuration error" })),
        )
            .into_response();
    };

    match verifier.verify(&token).await {
        Ok(v) if v.success => (
            StatusCode::OK,
            Json(json!({ "success": true, "score": v.score })),
        )
            .into_response(),
        Ok(v) => {
            warn!(error_codes = ?v.error_codes, "reCAPTCHA verification failed");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": "reCAPTCHA verification failed",
                    "error-codes": v.error_codes,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!("reCAPTCHA verification error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}

/// Any method other than POST on the relay route.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}
