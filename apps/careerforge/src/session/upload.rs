//! Upload orchestration: validate → extract → parse → seed the builder.

use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::analysis::models::ProcessedResumeData;
use crate::analysis::{AnalysisError, AnalysisService};
use crate::gamification::Reward;
use crate::intake::{validate, ExtractionError, TextExtractor, UploadedFile, ValidationError};
use crate::session::progress::ProgressTicker;
use crate::session::SessionHandle;

/// Shown on the upload card whenever extraction or parsing fails.
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to process resume. Please try again.";

const PROGRESS_STEP: u8 = 10;
const PROGRESS_CAP: u8 = 90;
const PROGRESS_TICK: Duration = Duration::from_millis(200);
/// Pause at 100% before the result is committed.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A resume is already being processed")]
    Busy,

    #[error("Text extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Resume parsing failed: {0}")]
    Parse(#[from] AnalysisError),
}

impl SessionHandle {
    /// Runs one upload end to end. On success the parsed data is cached, the
    /// builder is seeded and upload XP is awarded.
    pub async fn handle_upload(
        &self,
        file: UploadedFile,
        extractor: &dyn TextExtractor,
        analyzer: &dyn AnalysisService,
    ) -> Result<ProcessedResumeData, UploadError> {
        if let Err(e) = validate(&file) {
            warn!(file = %file.name, "Upload rejected: {e}");
            // The card belongs to the upload in flight, if any.
            if let Some(_ticket) = self.upload_gate.try_acquire() {
                self.lock().await.upload.error = Some(e.to_string());
            }
            return Err(e.into());
        }

        let _ticket = self.upload_gate.try_acquire().ok_or(UploadError::Busy)?;

        {
            let mut session = self.lock().await;
            session.upload.file = Some(file.metadata());
            session.upload.error = None;
            session.upload.processing = true;
        }
        self.upload_progress.set(0);
        info!(file = %file.name, size = file.size(), "Processing resume upload");

        let ticker = ProgressTicker::start(
            self.upload_progress.clone(),
            PROGRESS_STEP,
            PROGRESS_CAP,
            PROGRESS_TICK,
        );
        let result = extract_and_parse(&file, extractor, analyzer).await;
        drop(ticker);

        match result {
            Ok(processed) => {
                self.upload_progress.set(100);
                tokio::time::sleep(SETTLE_DELAY).await;

                let mut session = self.lock().await;
                session.builder.import_processed(&processed);
                session.cache.processed_resume = Some(processed.clone());
                let change = session.tracker.award(Reward::ResumeUpload);
                session.upload.error = None;
                session.upload.processing = false;
                info!(
                    skills = processed.skills.len(),
                    xp = change.xp,
                    "Resume processed"
                );
                Ok(processed)
            }
            Err(e) => {
                error!(file = %file.name, "Error processing file: {e}");
                let mut session = self.lock().await;
                session.upload.error = Some(UPLOAD_FAILED_MESSAGE.to_string());
                session.upload.processing = false;
                self.upload_progress.set(0);
                Err(e)
            }
        }
    }
}

async fn extract_and_parse(
    file: &UploadedFile,
    extractor: &dyn TextExtractor,
    analyzer: &dyn AnalysisService,
) -> Result<ProcessedResumeData, UploadError> {
    let text = extractor.extract(file).await?;
    Ok(analyzer.parse(&text).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::KeywordAnalyzer;
    use crate::intake::{FixtureExtractor, MAX_UPLOAD_BYTES};
    use crate::session::test_support::{CountingExtractor, ScriptedAnalyzer};

    fn jane_doe_txt() -> UploadedFile {
        let mut text = String::from("Jane Doe\njane@x.com\n");
        text.push_str(&" ".repeat(2048 - text.len()));
        UploadedFile::new("jane.txt", "text/plain", text.into_bytes())
    }

    #[tokio::test(start_paused = true)]
    async fn test_txt_upload_seeds_builder_and_awards_xp() {
        let handle = SessionHandle::new();
        let before = handle.lock().await.tracker().xp();

        let processed = handle
            .handle_upload(jane_doe_txt(), &FixtureExtractor, &KeywordAnalyzer)
            .await
            .unwrap();

        assert_eq!(processed.personal_info.name, "Jane Doe");
        let session = handle.lock().await;
        assert_eq!(session.tracker().xp(), before + 100);
        assert_eq!(session.builder().data().personal_info.email, "jane@x.com");
        assert_eq!(
            session.cache().processed_resume.as_ref().map(|p| p.personal_info.name.as_str()),
            Some("Jane Doe")
        );
        assert!(!session.upload().processing);
        assert!(session.upload().error.is_none());
        assert_eq!(session.upload().file.as_ref().map(|f| f.size), Some(2048));
        drop(session);
        assert_eq!(handle.upload_progress(), 100);
    }

    #[tokio::test]
    async fn test_disallowed_type_never_extracts() {
        let handle = SessionHandle::new();
        let extractor = CountingExtractor::default();
        let file = UploadedFile::new("photo.png", "image/png", vec![0u8; 64]);

        let err = handle
            .handle_upload(file, &extractor, &KeywordAnalyzer)
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Validation(ValidationError::UnsupportedType { .. })));
        assert_eq!(extractor.calls(), 0);
        let session = handle.lock().await;
        assert_eq!(
            session.upload().error.as_deref(),
            Some("Please upload a PDF, DOC, DOCX, or TXT file")
        );
        assert!(session.upload().file.is_none());
        assert_eq!(session.tracker().xp(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_size_limit_checked_before_extraction() {
        let handle = SessionHandle::new();
        let extractor = CountingExtractor::default();

        let too_big = UploadedFile::new("big.txt", "text/plain", vec![b'a'; MAX_UPLOAD_BYTES as usize + 1]);
        let err = handle
            .handle_upload(too_big, &extractor, &KeywordAnalyzer)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Validation(ValidationError::FileTooLarge { .. })));
        assert_eq!(extractor.calls(), 0);

        let at_limit = UploadedFile::new("big.txt", "text/plain", vec![b'a'; MAX_UPLOAD_BYTES as usize]);
        handle
            .handle_upload(at_limit, &extractor, &KeywordAnalyzer)
            .await
            .unwrap();
        assert_eq!(extractor.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_parse_failure_keeps_file_and_resets_progress() {
        let handle = SessionHandle::new();
        let analyzer = ScriptedAnalyzer::failing_parse();

        let err = handle
            .handle_upload(jane_doe_txt(), &FixtureExtractor, &analyzer)
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Parse(_)));
        let session = handle.lock().await;
        assert_eq!(session.upload().error.as_deref(), Some(UPLOAD_FAILED_MESSAGE));
        assert_eq!(session.upload().file.as_ref().map(|f| f.name.as_str()), Some("jane.txt"));
        assert!(!session.upload().processing);
        assert!(session.cache().processed_resume.is_none());
        assert_eq!(session.tracker().xp(), 0);
        drop(session);
        assert_eq!(handle.upload_progress(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_extraction_failure_surfaces_generic_message() {
        let handle = SessionHandle::new();
        let file = UploadedFile::new("cv.doc", "application/octet-stream", vec![1u8; 16]);

        let err = handle
            .handle_upload(file, &FixtureExtractor, &KeywordAnalyzer)
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::Extraction(ExtractionError::UnsupportedFormat { .. })));
        assert_eq!(
            handle.lock().await.upload().error.as_deref(),
            Some(UPLOAD_FAILED_MESSAGE)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_upload_while_processing_is_busy() {
        let handle = SessionHandle::new();
        let slow = CountingExtractor::with_delay(Duration::from_secs(3));

        let first = {
            let handle = handle.clone();
            let slow = slow.clone();
            tokio::spawn(async move {
                handle
                    .handle_upload(jane_doe_txt(), &slow, &KeywordAnalyzer)
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(1_100)).await;
        assert!(handle.lock().await.upload().processing);
        assert_eq!(handle.upload_progress(), 50);

        let second = handle
            .handle_upload(jane_doe_txt(), &slow, &KeywordAnalyzer)
            .await;
        assert!(matches!(second, Err(UploadError::Busy)));

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(handle.upload_progress(), 90, "ticker caps at 90");

        first.await.unwrap().unwrap();
        assert_eq!(slow.calls(), 1);
        assert_eq!(handle.lock().await.tracker().xp(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_file_during_upload_leaves_card_alone() {
        let handle = SessionHandle::new();
        let slow = CountingExtractor::with_delay(Duration::from_secs(2));

        let first = {
            let handle = handle.clone();
            let slow = slow.clone();
            tokio::spawn(async move {
                handle
                    .handle_upload(jane_doe_txt(), &slow, &KeywordAnalyzer)
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(500)).await;

        let png = UploadedFile::new("photo.png", "image/png", vec![0u8; 64]);
        let err = handle
            .handle_upload(png, &slow, &KeywordAnalyzer)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Validation(_)));
        assert!(handle.lock().await.upload().error.is_none());

        first.await.unwrap().unwrap();
        let session = handle.lock().await;
        assert!(!session.upload().processing);
        assert!(session.upload().error.is_none());
        assert_eq!(session.upload().file.as_ref().map(|f| f.name.as_str()), Some("jane.txt"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_upload_clears_earlier_error() {
        let handle = SessionHandle::new();
        let png = UploadedFile::new("photo.png", "image/png", vec![0u8; 64]);
        handle
            .handle_upload(png, &FixtureExtractor, &KeywordAnalyzer)
            .await
            .unwrap_err();
        assert!(handle.lock().await.upload().error.is_some());

        handle
            .handle_upload(jane_doe_txt(), &FixtureExtractor, &KeywordAnalyzer)
            .await
            .unwrap();
        assert!(handle.lock().await.upload().error.is_none());
    }
}
