//! Shared application state

use std::sync::Arc;

use gallery_core::{Config, ImageValidator, ProviderMode};
use gallery_services::{PhotoService, SelectedProvider};

use crate::drafts::DraftStore;

/// Everything the handlers need, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub photos: Arc<dyn PhotoService>,
    pub mode: ProviderMode,
    pub drafts: DraftStore,
    pub validator: ImageValidator,
}

impl AppState {
    pub fn new(config: &Config, provider: SelectedProvider) -> Self {
        Self {
            photos: provider.service,
            mode: provider.mode,
            drafts: DraftStore::new(),
            validator: ImageValidator::new(config.max_upload_bytes()),
        }
    }

    /// Offline banner switch; has no effect on behaviour
    pub fn is_local_mode(&self) -> bool {
        self.mode.is_local()
    }
}
