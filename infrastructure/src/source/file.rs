//! File resource source

use super::decode_body;
use async_trait::async_trait;
use navigator_application::{ResourceSource, SourceError};
use navigator_domain::Resource;
use std::path::{Path, PathBuf};

/// Reads the catalog from a local JSON file
pub struct FileResourceSource {
    path: PathBuf,
}

impl FileResourceSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ResourceSource for FileResourceSource {
    async fn fetch(&self) -> Result<Vec<Resource>, SourceError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|e| SourceError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        decode_body(&body, &self.describe())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 1, "service_type": "Therapy Services", "partners": ["MHP"]},
                {"service_type": "Respite Care", "direction": ["Call", "Visit"]}
            ]"#,
        )
        .unwrap();

        let resources = FileResourceSource::new(&path).fetch().await.unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].id.as_deref(), Some("1"));
        assert_eq!(resources[1].direction.lines(), vec!["Call", "Visit"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileResourceSource::new(dir.path().join("missing.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
