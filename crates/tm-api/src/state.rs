use std::sync::Arc;

use tm_db::service::TmService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TmService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: TmService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
