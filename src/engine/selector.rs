use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::engine::clock::Clock;
use crate::engine::eligibility::eligible;
use crate::engine::picker::pick;
use crate::engine::random::RandomSource;
use crate::errors::{Result, RotatorError};
use crate::storage::BannerStore;
use crate::storage::models::Banner;

/// Answers "which banner should place P show now?"
///
/// Read-only: choosing a banner does not count as an impression. Call
/// [`ImpressionRecorder`](crate::engine::ImpressionRecorder) once the banner
/// is actually rendered.
#[derive(Clone)]
pub struct BannerSelector {
    store: Arc<dyn BannerStore>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl BannerSelector {
    pub fn new(
        store: Arc<dyn BannerStore>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            store,
            clock,
            random,
        }
    }

    pub async fn select_for_place(&self, place_id: i64) -> Result<Banner> {
        self.select_for_place_at(place_id, self.clock.now()).await
    }

    pub async fn select_for_place_at(&self, place_id: i64, now: DateTime<Utc>) -> Result<Banner> {
        let pool = self.store.fetch_banners_for_place(place_id).await?;
        let pool_size = pool.len();

        let candidates = eligible(pool, place_id, now);
        if candidates.is_empty() {
            debug!(
                "BannerSelector: place {} has {} banners, none eligible at {}",
                place_id,
                pool_size,
                now.to_rfc3339()
            );
            return Err(RotatorError::no_eligible_banner(format!(
                "no eligible banner for place {}",
                place_id
            )));
        }

        let weighted: Vec<(Banner, f64)> = candidates
            .into_iter()
            .map(|banner| {
                let weight = banner.weight as f64;
                (banner, weight)
            })
            .collect();

        let chosen = pick(&weighted, self.random.as_ref())?;
        debug!(
            "BannerSelector: place {} -> banner {} ({} candidates)",
            place_id,
            chosen.id,
            weighted.len()
        );
        Ok(chosen.clone())
    }
}
