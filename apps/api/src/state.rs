use std::sync::Arc;

use crate::analysis::scorer::ResumeScorer;
use crate::history::HistoryStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Record store for past analyses and their source files. Constructed
    /// once at startup and injected, never reached for as a global.
    pub store: Arc<dyn HistoryStore>,
    /// Scoring model chosen at startup via SCORING_MODEL. Read-only and
    /// pure, so it is shared freely across concurrent requests.
    pub scorer: Arc<dyn ResumeScorer>,
}
