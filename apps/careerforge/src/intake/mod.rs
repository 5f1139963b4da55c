//! Resume intake: allow-list validation of the uploaded file and plain-text extraction.

pub mod extractor;
pub mod fixtures;
pub mod validator;

use bytes::Bytes;
use serde::Serialize;

pub use extractor::{
    build_extractor, DocumentExtractor, DocumentKind, ExtractionBackend, ExtractionError,
    FixtureExtractor, TextExtractor,
};
pub use validator::{format_file_size, validate, ValidationError, MAX_UPLOAD_BYTES};

/// A user-selected file, fully buffered in memory.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    /// Declared MIME type. Empty when the client did not send one.
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn metadata(&self) -> FileMetadata {
        FileMetadata {
            name: self.name.clone(),
            content_type: self.content_type.clone(),
            size: self.size(),
            size_label: format_file_size(self.size()),
        }
    }
}

/// What the upload card shows about the retained file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMetadata {
    pub name: String,
    pub content_type: String,
    pub size: u64,
    pub size_label: String,
}
