/*
[INPUT]:  Locally selected files and externally generated documents
[OUTPUT]: Ordered staged-file set and sequential upload results
[POS]:    Domain logic - file staging and upload pipeline
[UPDATE]: When staging identity or upload ordering rules change
[UPDATE]: 2026-08-05 Carry the failing file name in upload errors
*/

use std::path::PathBuf;

use flowdesk_adapter::FlowdeskClient;
use thiserror::Error;
use tracing::{debug, warn};

/// Where a staged file's bytes come from. Generated documents arrive as
/// in-memory bytes; operator-selected files stay on disk until upload.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    Disk(PathBuf),
    Memory(Vec<u8>),
}

/// A file attached locally but not yet uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub name: String,
    pub size: u64,
    source: FileSource,
}

impl StagedFile {
    /// Stage in-memory bytes under the given name.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// Stage a file on disk; size is read from metadata up front so the
    /// dedup identity is stable before upload.
    pub async fn from_path(path: PathBuf) -> std::io::Result<Self> {
        let metadata = tokio::fs::metadata(&path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            size: metadata.len(),
            source: FileSource::Disk(path),
        })
    }

    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Disk(path) => tokio::fs::read(path).await,
            FileSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// A file generated for a specific task before its dialog opened.
#[derive(Debug, Clone, PartialEq)]
pub struct PreStagedFile {
    pub task_id: String,
    pub file: StagedFile,
}

/// Failure during the staged-upload loop, carrying the failing file's name.
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("{message} (file {name})")]
    Upload { name: String, message: String },

    #[error("cannot read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Append-only staged-file set with `(name, size)` dedup.
///
/// Order is preserved so upload order is deterministic and matches what
/// the operator sees.
#[derive(Debug, Clone, Default)]
pub struct FileStaging {
    files: Vec<StagedFile>,
}

impl FileStaging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Stage a file. Returns false (and keeps the set unchanged) when an
    /// entry with the same name and size is already staged.
    pub fn add(&mut self, file: StagedFile) -> bool {
        let duplicate = self
            .files
            .iter()
            .any(|staged| staged.name == file.name && staged.size == file.size);
        if duplicate {
            warn!(name = %file.name, size = file.size, "duplicate file ignored");
            return false;
        }
        self.files.push(file);
        true
    }

    /// Remove the first staged entry with this name. Name is treated as a
    /// sufficient key within one task's staging set.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.files.iter().position(|staged| staged.name == name) {
            Some(index) => {
                self.files.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Upload every staged file, one at a time, in staged order.
    ///
    /// Returns the server-assigned file ids in the same order. The first
    /// failure aborts the loop immediately; files uploaded before it stay
    /// on the server (no rollback).
    pub async fn upload_all(&self, client: &FlowdeskClient) -> Result<Vec<String>, StagingError> {
        let mut file_ids = Vec::with_capacity(self.files.len());
        for staged in &self.files {
            let bytes = staged.read_bytes().await.map_err(|err| StagingError::Read {
                name: staged.name.clone(),
                source: err,
            })?;
            let uploaded = client
                .upload_file(&staged.name, bytes)
                .await
                .map_err(|err| StagingError::Upload {
                    name: staged.name.clone(),
                    message: err.user_message(),
                })?;
            debug!(name = %staged.name, file_id = %uploaded.file_id, "file uploaded");
            file_ids.push(uploaded.file_id);
        }
        Ok(file_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_and_size_is_ignored() {
        let mut staging = FileStaging::new();
        assert!(staging.add(StagedFile::from_bytes("a.pdf", vec![0u8; 100])));
        assert!(!staging.add(StagedFile::from_bytes("a.pdf", vec![1u8; 100])));
        assert_eq!(staging.len(), 1);
    }

    #[test]
    fn test_same_name_different_size_both_stage() {
        let mut staging = FileStaging::new();
        assert!(staging.add(StagedFile::from_bytes("a.pdf", vec![0u8; 100])));
        assert!(staging.add(StagedFile::from_bytes("a.pdf", vec![0u8; 200])));
        assert_eq!(staging.len(), 2);
    }

    #[test]
    fn test_order_is_append_order() {
        let mut staging = FileStaging::new();
        staging.add(StagedFile::from_bytes("first.txt", vec![1]));
        staging.add(StagedFile::from_bytes("second.txt", vec![1, 2]));
        staging.add(StagedFile::from_bytes("third.txt", vec![1, 2, 3]));
        let names: Vec<&str> = staging.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first.txt", "second.txt", "third.txt"]);
    }

    #[test]
    fn test_remove_takes_first_match_only() {
        let mut staging = FileStaging::new();
        staging.add(StagedFile::from_bytes("a.pdf", vec![0u8; 100]));
        staging.add(StagedFile::from_bytes("a.pdf", vec![0u8; 200]));

        assert!(staging.remove("a.pdf"));
        assert_eq!(staging.len(), 1);
        assert_eq!(staging.files()[0].size, 200);

        assert!(!staging.remove("missing.pdf"));
    }

    #[tokio::test]
    async fn test_from_path_reads_metadata() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("evidence.bin");
        tokio::fs::write(&path, vec![7u8; 42]).await.expect("write");

        let staged = StagedFile::from_path(path).await.expect("stage");
        assert_eq!(staged.name, "evidence.bin");
        assert_eq!(staged.size, 42);
    }
}
