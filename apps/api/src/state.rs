use std::sync::Arc;

use crate::ai_client::SuggestionBackend;
use crate::analysis::lexicon::Lexicon;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The lexicon is the only process-wide data and it is read-only after
/// startup, so concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub lexicon: Arc<Lexicon>,
    /// Pluggable suggestion collaborator. Default: GeminiClient when an API
    /// key is configured, DisabledSuggestions otherwise.
    pub suggester: Arc<dyn SuggestionBackend>,
    pub config: Config,
}
