use std::sync::Arc;

use crate::analysis::AnalysisService;
use crate::config::Config;
use crate::intake::TextExtractor;
use crate::session::SessionHandle;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    /// Pluggable analysis backend. Default: KeywordAnalyzer. Swap via ANALYSIS_BACKEND.
    pub analyzer: Arc<dyn AnalysisService>,
    /// Pluggable text extractor. Default: FixtureExtractor. Swap via EXTRACTION_BACKEND.
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Config,
}
