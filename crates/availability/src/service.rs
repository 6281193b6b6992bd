use std::sync::Arc;

use chrono::NaiveDate;
use marquee_core::release::ClassificationResult;
use marquee_core::types::TitleKey;
use marquee_metadata::MetadataError;
use marquee_metadata::provider::MetadataProvider;
use tracing::{debug, warn};

use crate::classify::classify;

/// Fetches availability inputs for a title and classifies them.
#[derive(Clone)]
pub struct AvailabilityService {
    provider: Arc<dyn MetadataProvider>,
}

impl AvailabilityService {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// Classify `key` as of `now`.
    ///
    /// Release dates and watch providers are requested concurrently. If
    /// either request fails the failure is logged and returned, so callers
    /// can tell a real classification from a missing one.
    pub async fn try_lookup(
        &self,
        key: TitleKey,
        now: NaiveDate,
        home_country: &str,
    ) -> Result<ClassificationResult, MetadataError> {
        let (releases, providers) = tokio::join!(
            self.provider.release_dates(key),
            self.provider.watch_providers(key),
        );

        let (releases, providers) = match (releases, providers) {
            (Ok(r), Ok(p)) => (r, p),
            (Err(e), _) | (_, Err(e)) => {
                warn!(
                    title = %key,
                    provider = self.provider.name(),
                    error = %e,
                    "availability inputs unavailable"
                );
                return Err(e);
            }
        };

        let result = classify(&releases, &providers, now, home_country);
        debug!(
            title = %key,
            releases = releases.len(),
            countries = providers.len(),
            label = %result.release_type,
            "classified availability"
        );
        Ok(result)
    }

    /// Like [`try_lookup`](Self::try_lookup), but a failed fetch yields the
    /// neutral [`ClassificationResult::unavailable`] instead of an error.
    pub async fn lookup(
        &self,
        key: TitleKey,
        now: NaiveDate,
        home_country: &str,
    ) -> ClassificationResult {
        self.try_lookup(key, now, home_country)
            .await
            .unwrap_or_else(|_| ClassificationResult::unavailable())
    }
}
