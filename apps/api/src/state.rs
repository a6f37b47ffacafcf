use std::sync::Arc;

use crate::config::Config;
use crate::resumes::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable resume store. Postgres in production, in-memory in tests.
    pub resumes: Arc<dyn ResumeStore>,
    pub config: Config,
}
