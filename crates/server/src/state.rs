use std::sync::Arc;

use marquee_availability::{AvailabilityService, ClassificationCache};
use marquee_core::embed::EmbedCatalog;
use marquee_metadata::provider::MetadataProvider;
use tokio::sync::Mutex;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<dyn MetadataProvider>,
    pub availability: AvailabilityService,
    pub cache: Arc<Mutex<ClassificationCache>>,
    pub embeds: Arc<EmbedCatalog>,
    pub home_country: String,
}

impl AppState {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        embeds: EmbedCatalog,
        home_country: impl Into<String>,
    ) -> Self {
        Self {
            availability: AvailabilityService::new(metadata.clone()),
            metadata,
            cache: Arc::new(Mutex::new(ClassificationCache::new())),
            embeds: Arc::new(embeds),
            home_country: home_country.into(),
        }
    }
}
