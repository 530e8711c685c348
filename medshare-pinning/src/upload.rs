//! Building uploads from files on disk.

use std::path::Path;

use medshare_core::error::{MedshareError, Result};
use medshare_core::types::FileUpload;

/// Reads a file into a [`FileUpload`], guessing its MIME type from the extension.
pub async fn read_file_upload(path: impl AsRef<Path>) -> Result<FileUpload> {
    let path = path.as_ref();

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            MedshareError::UploadFailed(format!("Not a file path: {}", path.display()))
        })?
        .to_string();

    let data = tokio::fs::read(path).await?;
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(FileUpload::new(file_name, content_type, data))
}
