use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::DownloadFile;

/// Receives finished documents. Rendering never depends on what a sink does
/// with the bytes.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    async fn deliver(&self, file: DownloadFile) -> Result<(), ServerError>;
}
