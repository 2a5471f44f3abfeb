use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use super::ExportError;

/// A finished export: file name plus PDF bytes.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Destination for finished artifacts.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Stores the artifact and returns its file name.
    async fn save(&self, artifact: &Artifact) -> Result<String, ExportError>;
}

/// Writes artifacts into a directory. Files are staged in a temp file in the
/// same directory and renamed into place, so readers never see a partial PDF.
pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ArtifactSink for FsSink {
    async fn save(&self, artifact: &Artifact) -> Result<String, ExportError> {
        let dir = self.dir.clone();
        let staged_artifact = artifact.clone();

        let path = tokio::task::spawn_blocking(move || -> Result<PathBuf, ExportError> {
            std::fs::create_dir_all(&dir)?;
            let mut staged = tempfile::NamedTempFile::new_in(&dir)?;
            staged.write_all(&staged_artifact.bytes)?;
            let target = dir.join(&staged_artifact.file_name);
            staged.persist(&target).map_err(|e| ExportError::Io(e.error))?;
            Ok(target)
        })
        .await??;

        info!(path = %path.display(), "Artifact saved");
        Ok(artifact.file_name.clone())
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::Mutex;

    use super::*;

    /// Keeps saved artifacts in memory, in save order.
    #[derive(Default)]
    pub struct MemorySink {
        pub saved: Mutex<Vec<Artifact>>,
    }

    #[async_trait]
    impl ArtifactSink for MemorySink {
        async fn save(&self, artifact: &Artifact) -> Result<String, ExportError> {
            self.saved.lock().unwrap().push(artifact.clone());
            Ok(artifact.file_name.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsSink::new(dir.path().join("out"));
        let artifact = Artifact {
            file_name: "Ada_Resume.pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.7 test"),
        };

        let saved = sink.save(&artifact).await.unwrap();

        assert_eq!(saved, "Ada_Resume.pdf");
        let written = std::fs::read(dir.path().join("out/Ada_Resume.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.7 test");
        // only the persisted file remains
        assert_eq!(std::fs::read_dir(dir.path().join("out")).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_fs_sink_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsSink::new(dir.path());
        for body in [&b"first"[..], &b"second"[..]] {
            let artifact = Artifact {
                file_name: "a.pdf".to_string(),
                bytes: Bytes::copy_from_slice(body),
            };
            sink.save(&artifact).await.unwrap();
        }
        assert_eq!(std::fs::read(dir.path().join("a.pdf")).unwrap(), b"second");
    }
}
