use std::sync::Arc;

use crate::captcha::CaptchaVerifier;
use crate::export::Exporter;
use crate::models::resume::ResumeData;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup; read-only afterwards.
    pub resume: Arc<ResumeData>,
    pub exporter: Arc<Exporter>,
    /// `None` when no CAPTCHA secret is configured.
    pub captcha: Option<Arc<dyn CaptchaVerifier>>,
}
