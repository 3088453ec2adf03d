use crate::config::Config;
use crate::layout::PageConfig;
use crate::llm_client::LlmClient;
use crate::store::DraftStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Drafts and saved results, backed by Redis or process memory.
    pub drafts: DraftStore,
    pub config: Config,
    /// Page geometry for PDF export. A4 with 20mm margins.
    pub page_config: PageConfig,
}
