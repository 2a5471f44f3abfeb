/// Export drivers: document build, layout and PDF serialization, then
/// delivery to an artifact sink.
use thiserror::Error;

use crate::render::RenderError;

pub mod driver;
pub mod guard;
pub mod naming;
pub mod sink;

pub use driver::{ExportTarget, Exporter};
pub use sink::FsSink;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("An export is already in progress")]
    Busy,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Artifact write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
