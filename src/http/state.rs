use crate::session::CompressionSession;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The session every request operates on
    pub session: Arc<CompressionSession>,
}

impl AppState {
    pub fn new(session: CompressionSession) -> Self {
        Self {
            session: Arc::new(session),
        }
    }
}
