pub mod contact;
pub mod export;
pub mod health;
pub mod resume;

use axum::{
    routing::{get, post},
    Router,
};

use crate::captcha::handlers as captcha;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CAPTCHA relay (path kept stable for the front end)
        .route(
            "/api/verify-recaptcha",
            post(captcha::verify_recaptcha).fallback(captcha::method_not_allowed),
        )
        // Résumé data
        .route("/api/v1/resume", get(resume::get_resume))
        .route("/api/v1/technologies", get(resume::list_technologies))
        .route("/api/v1/technologies/:name", get(resume::get_technology))
        // Exports
        .route("/api/v1/export", post(export::create_export))
        .route("/api/v1/export/resume", get(export::download_resume))
        .route(
            "/api/v1/export/cover-letter",
            get(export::download_cover_letter),
        )
        .route("/api/v1/export/markdown", get(export::download_markdown))
        // Contact
        .route("/api/v1/contact/reveal", post(contact::reveal_email))
        .with_state(state)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::captcha::{CaptchaError, CaptchaVerifier, Verification};
    use crate::export::sink::memory::MemorySink;
    use crate::export::Exporter;
    use crate::models::resume::fixtures::{job, resume, ym};

    /// Answers every token with a canned outcome; `None` simulates a
    /// transport failure.
    struct StubVerifier(Option<Verification>);

    #[async_trait]
    impl CaptchaVerifier for StubVerifier {
        async fn verify(&self, _token: &str) -> Result<Verification, CaptchaError> {
            self.0.clone().ok_or(CaptchaError::Api { status: 503 })
        }
    }

    fn stub(outcome: Option<Verification>) -> Option<Arc<dyn CaptchaVerifier>> {
        let verifier: Arc<dyn CaptchaVerifier> = Arc::new(StubVerifier(outcome));
        Some(verifier)
    }

    fn passing() -> Option<Arc<dyn CaptchaVerifier>> {
        stub(Some(Verification {
            success: true,
            score: Some(0.9),
            error_codes: vec![],
        }))
    }

    fn failing() -> Option<Arc<dyn CaptchaVerifier>> {
        stub(Some(Verification {
            success: false,
            score: None,
            error_codes: vec!["timeout-or-duplicate".to_string()],
        }))
    }

    fn test_state(captcha: Option<Arc<dyn CaptchaVerifier>>) -> AppState {
        let data = Arc::new(resume(vec![
            job("acme", "Acme", ym(2015, 1), Some(ym(2020, 1)), &["Java", "AWS"]),
            job("beta", "Beta", ym(2020, 6), None, &["Rust", "aws"]),
        ]));
        let exporter = Exporter::new(
            Arc::clone(&data),
            Arc::new(MemorySink::default()),
            Duration::ZERO,
        );
        AppState {
            resume: data,
            exporter: Arc::new(exporter),
            captcha,
        }
    }

    async fn send(state: AppState, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&v).unwrap())
            }
            None => Body::empty(),
        };
        build_router(state)
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(test_state(None), Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_resume_returns_static_record() {
        let response = send(test_state(None), Method::GET, "/api/v1/resume", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["personal"]["name"], "Ada Quinn Lovelace");
        assert_eq!(body["experience"][0]["startDate"], "2015-01");
        assert_eq!(body["experience"][1]["endDate"], Value::Null);
    }

    #[tokio::test]
    async fn test_technologies_ranked_by_experience() {
        let response = send(test_state(None), Method::GET, "/api/v1/technologies", None).await;
        let body = read_json(response).await;
        // AWS sums both jobs; Rust runs from 2020-06 to now; Java is a closed 5 years
        assert_eq!(body[0]["technology"], "AWS");
        assert_eq!(body[0]["last_used"], "Present");
        assert_eq!(body[0]["companies"], json!(["Acme", "Beta"]));
        assert_eq!(body[1]["technology"], "Rust");
        assert_eq!(body[2]["technology"], "Java");
        assert_eq!(body[2]["duration"], "5 years");
        assert_eq!(body[2]["first_used"], "January 2015");
        assert_eq!(body[2]["last_used"], "January 2020");
    }

    #[tokio::test]
    async fn test_technologies_alphabetical() {
        let response = send(
            test_state(None),
            Method::GET,
            "/api/v1/technologies?order=alphabetical",
            None,
        )
        .await;
        let body = read_json(response).await;
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["technology"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["AWS", "Java", "Rust"]);
    }

    #[tokio::test]
    async fn test_technology_detail_is_case_insensitive() {
        let response = send(test_state(None), Method::GET, "/api/v1/technologies/aws", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["technology"], "AWS");
        assert_eq!(body["jobs"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_technology_is_404() {
        let response = send(test_state(None), Method::GET, "/api/v1/technologies/cobol", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_resume_download_is_pdf_attachment() {
        let response = send(test_state(None), Method::GET, "/api/v1/export/resume", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Ada_Quinn_Lovelace_Resume.pdf\""
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_markdown_download() {
        let response = send(test_state(None), Method::GET, "/api/v1/export/markdown", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/markdown"));
    }

    #[tokio::test]
    async fn test_export_both_returns_file_names() {
        let response = send(
            test_state(None),
            Method::POST,
            "/api/v1/export",
            Some(json!({"kind": "both"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await["files"],
            json!([
                "Ada_Quinn_Lovelace_Cover_Letter.pdf",
                "Ada_Quinn_Lovelace_Resume.pdf"
            ])
        );
    }

    #[tokio::test]
    async fn test_export_while_busy_is_conflict() {
        let state = test_state(None);
        let _held = state.exporter.guard().try_acquire().unwrap();
        let response = send(
            state.clone(),
            Method::POST,
            "/api/v1/export",
            Some(json!({"kind": "resume"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_recaptcha_requires_token() {
        let response = send(
            test_state(passing()),
            Method::POST,
            "/api/verify-recaptcha",
            Some(json!({})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await, json!({"error": "Token is required"}));
    }

    #[tokio::test]
    async fn test_recaptcha_without_secret_is_config_error() {
        let response = send(
            test_state(None),
            Method::POST,
            "/api/verify-recaptcha",
            Some(json!({"token": "t"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            read_json(response).await,
            json!({"error": "Server configuration error"})
        );
    }

    #[tokio::test]
    async fn test_recaptcha_success_passes_score() {
        let response = send(
            test_state(passing()),
            Method::POST,
            "/api/verify-recaptcha",
            Some(json!({"token": "t"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!({"success": true, "score": 0.9}));
    }

    #[tokio::test]
    async fn test_recaptcha_failure_passes_error_codes() {
        let response = send(
            test_state(failing()),
            Method::POST,
            "/api/verify-recaptcha",
            Some(json!({"token": "t"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await,
            json!({
                "success": false,
                "error": "reCAPTCHA verification failed",
                "error-codes": ["timeout-or-duplicate"]
            })
        );
    }

    #[tokio::test]
    async fn test_recaptcha_transport_error_is_500() {
        let response = send(
            test_state(stub(None)),
            Method::POST,
            "/api/verify-recaptcha",
            Some(json!({"token": "t"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(response).await, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_recaptcha_rejects_other_methods() {
        let response = send(test_state(passing()), Method::GET, "/api/verify-recaptcha", None).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(read_json(response).await, json!({"error": "Method not allowed"}));
    }

    #[tokio::test]
    async fn test_contact_reveal_after_verification() {
        let response = send(
            test_state(passing()),
            Method::POST,
            "/api/v1/contact/reveal",
            Some(json!({"token": "t"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_contact_reveal_refused_on_failed_verification() {
        let response = send(
            test_state(failing()),
            Method::POST,
            "/api/v1/contact/reveal",
            Some(json!({"token": "t"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
