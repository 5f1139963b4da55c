//! Plain-text extraction from an upload, behind a swappable trait.
//!
//! Default: `FixtureExtractor` (plain text decoded, binary formats answered with fixtures).
//! Opt-in: `DocumentExtractor` (real PDF / DOCX extraction).
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`, chosen at startup via config.

use std::io::Read;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::intake::fixtures::{PDF_FIXTURE, WORD_FIXTURE};
use crate::intake::UploadedFile;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Upper bound on the decompressed `word/document.xml` we are willing to read.
const MAX_DOCUMENT_XML_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {name} ({content_type})")]
    UnsupportedFormat { name: String, content_type: String },

    #[error("Corrupt or unreadable {kind:?} file: {message}")]
    CorruptFile { kind: DocumentKind, message: String },

    #[error("Failed to read file: {0}")]
    Read(String),
}

/// The extraction branch a file is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    PlainText,
}

impl DocumentKind {
    /// Routes on the declared MIME type first, then on the filename suffix.
    /// Legacy `.doc` files without a Word MIME type have no branch.
    pub fn detect(name: &str, content_type: &str) -> Option<Self> {
        let name_lower = name.to_lowercase();
        if content_type == "application/pdf" {
            Some(DocumentKind::Pdf)
        } else if content_type.contains("word") || name_lower.ends_with(".docx") {
            Some(DocumentKind::Word)
        } else if content_type == "text/plain" {
            Some(DocumentKind::PlainText)
        } else if name_lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if name_lower.ends_with(".txt") {
            Some(DocumentKind::PlainText)
        } else {
            None
        }
    }
}

/// Which extractor backend the service runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionBackend {
    #[default]
    Fixture,
    Document,
}

impl FromStr for ExtractionBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixture" => Ok(ExtractionBackend::Fixture),
            "document" => Ok(ExtractionBackend::Document),
            other => Err(anyhow::anyhow!(
                "unknown extraction backend '{other}' (expected 'fixture' or 'document')"
            )),
        }
    }
}

/// Contract: `bytes × declared type -> text`, failing on unsupported or corrupt input.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError>;
}

pub fn build_extractor(backend: ExtractionBackend) -> Arc<dyn TextExtractor> {
    match backend {
        ExtractionBackend::Fixture => Arc::new(FixtureExtractor),
        ExtractionBackend::Document => Arc::new(DocumentExtractor),
    }
}

fn route(file: &UploadedFile) -> Result<DocumentKind, ExtractionError> {
    DocumentKind::detect(&file.name, &file.content_type).ok_or_else(|| {
        ExtractionError::UnsupportedFormat {
            name: file.name.clone(),
            content_type: file.content_type.clone(),
        }
    })
}

fn decode_plain_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// FixtureExtractor
// ────────────────────────────────────────────────────────────────────────────

/// Placeholder boundary: decodes plain text, answers PDF and Word uploads with
/// a fixed transcript instead of parsing them.
pub struct FixtureExtractor;

#[async_trait]
impl TextExtractor for FixtureExtractor {
    async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        let kind = route(file)?;
        debug!("Fixture extraction of '{}' as {kind:?}", file.name);
        Ok(match kind {
            DocumentKind::PlainText => decode_plain_text(&file.bytes),
            DocumentKind::Pdf => PDF_FIXTURE.to_string(),
            DocumentKind::Word => WORD_FIXTURE.to_string(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// DocumentExtractor
// ────────────────────────────────────────────────────────────────────────────

/// Real extraction: PDF via `pdf-extract`, DOCX via the `w:t` runs of
/// `word/document.xml`. Parsing is CPU-bound and runs on the blocking pool.
pub struct DocumentExtractor;

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        let kind = route(file)?;
        match kind {
            DocumentKind::PlainText => return Ok(decode_plain_text(&file.bytes)),
            DocumentKind::Word if !is_docx(file) => {
                return Err(ExtractionError::UnsupportedFormat {
                    name: file.name.clone(),
                    content_type: file.content_type.clone(),
                })
            }
            _ => {}
        }

        let bytes = file.bytes.clone();
        let text = tokio::task::spawn_blocking(move || match kind {
            DocumentKind::Pdf => extract_pdf(&bytes),
            _ => extract_docx(&bytes),
        })
        .await
        .map_err(|e| ExtractionError::Read(format!("extraction task failed: {e}")))??;

        debug!(
            "Extracted {} chars from '{}' ({kind:?})",
            text.len(),
            file.name
        );
        Ok(text)
    }
}

/// Only OOXML documents can be read; legacy binary `.doc` cannot.
fn is_docx(file: &UploadedFile) -> bool {
    file.name.to_lowercase().ends_with(".docx") || file.content_type == DOCX_MIME
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::CorruptFile {
        kind: DocumentKind::Pdf,
        message: e.to_string(),
    })
}

fn corrupt_word(message: impl ToString) -> ExtractionError {
    ExtractionError::CorruptFile {
        kind: DocumentKind::Word,
        message: message.to_string(),
    }
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).map_err(corrupt_word)?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(corrupt_word)?;

    let mut xml = Vec::new();
    entry
        .take(MAX_DOCUMENT_XML_BYTES)
        .read_to_end(&mut xml)
        .map_err(corrupt_word)?;
    if xml.len() as u64 >= MAX_DOCUMENT_XML_BYTES {
        return Err(corrupt_word("word/document.xml exceeds size limit"));
    }

    docx_text_runs(&xml)
}

/// Concatenates `w:t` runs, one line per `w:p` paragraph.
fn docx_text_runs(xml: &[u8]) -> Result<String, ExtractionError> {
    use quick_xml::events::Event;

    let mut out = String::new();
    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text = true,
            Ok(Event::Text(t)) if in_text => {
                out.push_str(t.unescape().map_err(corrupt_word)?.as_ref());
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(corrupt_word(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(out.trim_end().to_string())
}
