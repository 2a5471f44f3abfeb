mod captcha;
mod config;
mod contact;
mod document;
mod errors;
mod experience;
mod export;
mod layout;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::captcha::{CaptchaVerifier, RecaptchaClient};
use crate::config::Config;
use crate::export::{Exporter, FsSink};
use crate::models::resume::ResumeData;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume API v{}", env!("CARGO_PKG_VERSION"));

    // Static résumé data: any problem here is fatal
    let resume = Arc::new(ResumeData::load(&config.resume_data_path)?);
    info!(
        path = %config.resume_data_path.display(),
        jobs = resume.experience.len(),
        "Resume data loaded"
    );

    // Export drivers write into EXPORT_DIR
    let exporter = Exporter::new(
        Arc::clone(&resume),
        Arc::new(FsSink::new(config.export_dir.clone())),
        config.export_settle,
    );
    info!(dir = %config.export_dir.display(), "Export sink ready");

    // CAPTCHA relay is optional; without a secret it answers with a config error
    let captcha: Option<Arc<dyn CaptchaVerifier>> = match &config.recaptcha_secret {
        Some(secret) => {
            let client = RecaptchaClient::new(secret.clone())
                .context("Failed to build reCAPTCHA HTTP client")?;
            info!("reCAPTCHA client initialized");
            let verifier: Arc<dyn CaptchaVerifier> = Arc::new(client);
            Some(verifier)
        }
        None => {
            warn!("RECAPTCHA_SECRET_KEY is not set; CAPTCHA checks will fail");
            None
        }
    };

    let state = AppState {
        resume,
        exporter: Arc::new(exporter),
        captcha,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
