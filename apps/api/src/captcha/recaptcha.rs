use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{CaptchaError, CaptchaVerifier, Verification};

const SITEVERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// reCAPTCHA siteverify client.
#[derive(Clone)]
pub struct RecaptchaClient {
    client: Client,
    secret: String,
    endpoint: String,
}

impl RecaptchaClient {
    pub fn new(secret: String) -> Result<Self, CaptchaError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(10)).build()?,
            secret,
            endpoint: SITEVERIFY_URL.to_string(),
        })
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaClient {
    async fn verify(&self, token: &str) -> Result<Verification, CaptchaError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CaptchaError::Api {
                status: status.as_u16(),
            });
        }

        let verification: Verification = response.json().await?;
        debug!(
            success = verification.success,
            score = ?verification.score,
            "CAPTCHA verification completed"
        );
        Ok(verification)
    }
}
