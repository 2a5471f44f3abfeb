use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::guard::{ExportGuard, ExportPermit};
use super::naming::artifact_name;
use super::sink::{Artifact, ArtifactSink};
use super::ExportError;
use crate::document::{build_document, DocumentKind};
use crate::experience::period::YearMonth;
use crate::layout::{layout, letter_geometry, page_count, PageGeometry};
use crate::models::resume::ResumeData;
use crate::render::render_with_fallback;

/// What a save request should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportTarget {
    Resume,
    CoverLetter,
    /// Cover letter, settle delay, then résumé.
    Both,
}

pub struct Exporter {
    resume: Arc<ResumeData>,
    geometry: PageGeometry,
    sink: Arc<dyn ArtifactSink>,
    settle: Duration,
    guard: ExportGuard,
}

impl Exporter {
    pub fn new(resume: Arc<ResumeData>, sink: Arc<dyn ArtifactSink>, settle: Duration) -> Self {
        Self {
            resume,
            geometry: letter_geometry(),
            sink,
            settle,
            guard: ExportGuard::default(),
        }
    }

    #[cfg(test)]
    pub fn guard(&self) -> &ExportGuard {
        &self.guard
    }

    /// Renders one document without saving it. Ongoing jobs run to the
    /// current month.
    pub async fn render(&self, kind: DocumentKind) -> Result<Artifact, ExportError> {
        self.render_at(kind, YearMonth::current()).await
    }

    pub async fn render_at(
        &self,
        kind: DocumentKind,
        today: YearMonth,
    ) -> Result<Artifact, ExportError> {
        let resume = Arc::clone(&self.resume);
        let geometry = self.geometry.clone();

        // Layout is CPU-bound, keep it off the async executor
        let bytes = tokio::task::spawn_blocking(move || {
            let blocks = build_document(&resume, kind, today);
            let placements = layout(&blocks, &geometry);
            info!(
                ?kind,
                blocks = blocks.len(),
                pages = page_count(&placements),
                "Document laid out"
            );
            render_with_fallback(&placements, &geometry)
        })
        .await??;

        Ok(Artifact {
            file_name: artifact_name(&self.resume.personal.name, kind),
            bytes: Bytes::from(bytes),
        })
    }

    pub async fn export_resume(&self) -> Result<Vec<String>, ExportError> {
        let _permit = self.acquire()?;
        Ok(vec![self.export_one(DocumentKind::Resume).await?])
    }

    pub async fn export_cover_letter(&self) -> Result<Vec<String>, ExportError> {
        let _permit = self.acquire()?;
        Ok(vec![self.export_one(DocumentKind::CoverLetter).await?])
    }

    /// Cover letter first, then the résumé once the settle delay has passed.
    pub async fn export_both(&self) -> Result<Vec<String>, ExportError> {
        let _permit = self.acquire()?;
        let cover = self.export_one(DocumentKind::CoverLetter).await?;
        tokio::time::sleep(self.settle).await;
        let resume = self.export_one(DocumentKind::Resume).await?;
        Ok(vec![cover, resume])
    }

    pub async fn export(&self, target: ExportTarget) -> Result<Vec<String>, ExportError> {
        let result = match target {
            ExportTarget::Resume => self.export_resume().await,
            ExportTarget::CoverLetter => self.export_cover_letter().await,
            ExportTarget::Both => self.export_both().await,
        };
        if let Err(e) = &result {
            error!(?target, error = %e, "Export failed");
        }
        result
    }

    fn acquire(&self) -> Result<ExportPermit, ExportError> {
        self.guard.try_acquire().ok_or(ExportError::Busy)
    }

    async fn export_one(&self, kind: DocumentKind) -> Result<String, ExportError> {
        let artifact = self.render(kind).await?;
        self.sink.save(&artifact).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
