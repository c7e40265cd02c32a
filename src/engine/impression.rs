use std::sync::Arc;

use tracing::trace;

use crate::engine::lifecycle::bump;
use crate::errors::Result;
use crate::storage::BannerStore;
use crate::storage::models::{Banner, CounterField};

/// Counts one served impression
///
/// Not idempotent: call exactly once per rendered banner.
#[derive(Clone)]
pub struct ImpressionRecorder {
    store: Arc<dyn BannerStore>,
}

impl ImpressionRecorder {
    pub fn new(store: Arc<dyn BannerStore>) -> Self {
        Self { store }
    }

    /// Returns `banner` with the post-increment view count and updated flag
    pub async fn record_impression(&self, banner: &Banner) -> Result<Banner> {
        let update = bump(self.store.as_ref(), banner, CounterField::Views).await?;
        trace!("Impression recorded: banner {} views={}", banner.id, update.value);

        let mut updated = banner.clone();
        updated.views = update.value;
        if update.deactivated {
            updated.is_active = false;
        }
        Ok(updated)
    }
}
