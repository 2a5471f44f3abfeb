/// CAPTCHA relay. Forwards client tokens to the verification service.
///
/// The secret key never leaves the server. Handlers depend on the
/// `CaptchaVerifier` trait so tests can swap in a stub.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod handlers;
pub mod recaptcha;

pub use recaptcha::RecaptchaClient;

#[derive(Debug, Error)]
pub enum CaptchaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Verification service returned status {status}")]
    Api { status: u16 },
}

/// Outcome reported by the verification service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub success: bool,
    /// v3 risk score in `0.0..=1.0`; absent for v2 checks.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Verification, CaptchaError>;
}
