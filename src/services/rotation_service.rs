//! Rotation service
//!
//! Facade shared by the outer interfaces: resolves places by slug and banners
//! by id, then delegates to the selection engine.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::RotatorConfig;
use crate::engine::{
    BannerSelector, ClickMeta, ClickRecorder, Clock, ImpressionRecorder, RandomSource,
    SeededRandom, SystemClock, ThreadRandom,
};
use crate::errors::{Result, RotatorError};
use crate::storage::{Banner, BannerStore, ClickEvent, Place};

#[derive(Clone)]
pub struct RotationService {
    store: Arc<dyn BannerStore>,
    selector: BannerSelector,
    impressions: ImpressionRecorder,
    clicks: ClickRecorder,
}

impl RotationService {
    pub fn new(
        store: Arc<dyn BannerStore>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        config: &RotatorConfig,
    ) -> Self {
        Self {
            selector: BannerSelector::new(store.clone(), clock.clone(), random),
            impressions: ImpressionRecorder::new(store.clone()),
            clicks: ClickRecorder::new(store.clone(), clock)
                .with_user_agent_max_length(config.user_agent_max_length),
            store,
        }
    }

    /// System clock; seeded randomness when `rotator.seed` is set
    pub fn from_config(store: Arc<dyn BannerStore>, config: &RotatorConfig) -> Self {
        let random: Arc<dyn RandomSource> = match config.seed {
            Some(seed) => {
                info!("Rotator using fixed seed {}", seed);
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(ThreadRandom),
        };
        Self::new(store, Arc::new(SystemClock), random, config)
    }

    pub async fn place(&self, slug: &str) -> Result<Place> {
        self.store
            .find_place_by_slug(slug)
            .await?
            .ok_or_else(|| RotatorError::place_not_found(format!("place '{}' does not exist", slug)))
    }

    pub async fn banner(&self, banner_id: i64) -> Result<Banner> {
        self.store
            .get_banner(banner_id)
            .await?
            .ok_or_else(|| RotatorError::banner_not_found(format!("banner {} does not exist", banner_id)))
    }

    /// Chooses a banner for the place without counting an impression
    pub async fn select(&self, place_slug: &str) -> Result<Banner> {
        let place = self.place(place_slug).await?;
        self.selector.select_for_place(place.id).await
    }

    /// Chooses a banner and counts one impression for it
    pub async fn serve(&self, place_slug: &str) -> Result<Banner> {
        let chosen = self.select(place_slug).await?;
        let served = self.impressions.record_impression(&chosen).await?;
        debug!(
            "Served banner {} at '{}' (views {})",
            served.id, place_slug, served.views_display()
        );
        Ok(served)
    }

    pub async fn record_impression(&self, banner_id: i64) -> Result<Banner> {
        let banner = self.banner(banner_id).await?;
        self.impressions.record_impression(&banner).await
    }

    pub async fn click(&self, banner_id: i64, meta: ClickMeta) -> Result<ClickEvent> {
        let banner = self.banner(banner_id).await?;
        self.clicks.record_click(&banner, meta).await
    }
}
