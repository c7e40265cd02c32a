//! BannerStore implementation for SeaOrmStorage

use async_trait::async_trait;

use super::SeaOrmStorage;
use crate::errors::{Result, RotatorError};
use crate::storage::BannerStore;
use crate::storage::models::{Banner, ClickEvent, CounterField, NewClickEvent, Place};

#[async_trait]
impl BannerStore for SeaOrmStorage {
    async fn fetch_banners_for_place(&self, place_id: i64) -> Result<Vec<Banner>> {
        self.query_banners_for_place(place_id).await
    }

    async fn increment_counter(
        &self,
        banner_id: i64,
        field: CounterField,
        amount: i64,
    ) -> Result<i64> {
        self.update_counter(banner_id, field, amount)
            .await?
            .ok_or_else(|| {
                RotatorError::banner_not_found(format!("banner {} does not exist", banner_id))
            })
    }

    async fn set_active(&self, banner_id: i64, active: bool) -> Result<()> {
        self.update_active(banner_id, active).await
    }

    async fn create_click_event(&self, record: NewClickEvent) -> Result<ClickEvent> {
        self.insert_click(record).await
    }

    async fn get_banner(&self, banner_id: i64) -> Result<Option<Banner>> {
        self.query_banner(banner_id).await
    }

    async fn find_place_by_slug(&self, slug: &str) -> Result<Option<Place>> {
        self.query_place_by_slug(slug).await
    }
}
