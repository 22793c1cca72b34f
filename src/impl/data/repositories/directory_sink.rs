use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    domain::repositories::download_sink::DownloadSink,
    entities::DownloadFile,
    errors::{InvalidFileName, WriteError},
};

/// Saves every delivered file into one directory, overwriting any file with
/// the same name.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn target(&self, file_name: &str) -> Result<PathBuf, ServerError> {
        // Only a bare file name is accepted; anything with a directory
        // component could escape `dir`.
        match Path::new(file_name).file_name() {
            Some(name) if name == file_name => Ok(self.dir.join(name)),
            _ => Err(InvalidFileName::new(file_name)),
        }
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn deliver(&self, file: DownloadFile) -> Result<(), ServerError> {
        let target = self.target(&file.file_name)?;
        let target_str = target.to_string_lossy().to_string();
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| WriteError::with_debug(&target_str, &e))?;
        tokio::fs::write(&target, &file.bytes)
            .await
            .map_err(|e| WriteError::with_debug(&target_str, &e))?;
        tracing::info!(
            file = %target_str,
            mime_type = file.mime_type,
            bytes = file.bytes.len(),
            "document delivered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_names_with_directories() {
        let sink = DirectorySink::new("/tmp/out");
        assert!(sink.target("../escape.pdf").is_err());
        assert!(sink.target("a/b.pdf").is_err());
        assert!(sink.target("").is_err());
    }

    #[test]
    fn accepts_bare_names() {
        let sink = DirectorySink::new("/tmp/out");
        assert_eq!(
            sink.target("Recu_BL_1.pdf").unwrap(),
            PathBuf::from("/tmp/out/Recu_BL_1.pdf")
        );
    }
}
