/*
[INPUT]:  File bytes for upload, file ids for download
[OUTPUT]: Server file identifiers and downloaded binary content
[POS]:    HTTP layer - file endpoints (single-file multipart upload, download)
[UPDATE]: When the upload envelope or download header handling changes
[UPDATE]: 2026-08-05 Resolve download filenames from Content-Disposition
*/

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::http::{FlowdeskClient, FlowdeskError, Result};
use crate::types::{DownloadedFile, UploadedFile};

impl FlowdeskClient {
    /// Upload a single file
    ///
    /// POST /api/files/upload with a multipart body holding one `file` field.
    /// Callers wanting several files attached upload them one call at a
    /// time; the staging layer owns that ordering.
    pub async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadedFile> {
        debug!(filename, size = bytes.len(), "uploading file");

        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);

        let builder = self.api_request(Method::POST, "/api/files/upload")?.multipart(form);
        let outcome = self.send_envelope(builder).await?;

        if !outcome.success {
            let message = outcome
                .message
                .unwrap_or_else(|| "upload rejected".to_string());
            return Err(FlowdeskError::InvalidResponse(message));
        }
        outcome.data_as::<UploadedFile>().ok_or_else(|| {
            FlowdeskError::InvalidResponse("upload response missing file record".to_string())
        })
    }

    /// Download a stored file
    ///
    /// GET /api/files/{id}/download, a binary stream. The filename comes
    /// from `Content-Disposition` when the engine sends one, else from
    /// `fallback_name`.
    pub async fn download_file(&self, file_id: &str, fallback_name: &str) -> Result<DownloadedFile> {
        let endpoint = format!("/api/files/{}/download", file_id);
        let builder = self.api_request(Method::GET, &endpoint)?;
        let response = self.send_raw(builder).await?;

        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| fallback_name.to_string());

        let bytes = response.bytes().await?.to_vec();
        Ok(DownloadedFile { filename, bytes })
    }
}

/// Pull the `filename=` parameter out of a Content-Disposition header.
/// Handles quoted and bare forms; `filename*=` encoding is not supported
/// by the engine and is ignored here.
fn filename_from_content_disposition(header: &str) -> Option<String> {
    header.split(';').find_map(|segment| {
        let segment = segment.trim();
        let value = segment.strip_prefix("filename=")?;
        let value = value.trim().trim_matches('"').trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}
