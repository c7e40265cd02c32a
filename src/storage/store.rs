//! Store collaborator consumed by the rotation engine
//!
//! The engine never talks to a database directly; every read and write goes
//! through [`BannerStore`]. Implementations must make `increment_counter`
//! atomic with respect to concurrent increments on the same banner.

use async_trait::async_trait;

use crate::errors::Result;
use crate::storage::models::{Banner, ClickEvent, CounterField, NewClickEvent, Place};

#[async_trait]
pub trait BannerStore: Send + Sync {
    /// All banners attached to `place_id`, unfiltered
    async fn fetch_banners_for_place(&self, place_id: i64) -> Result<Vec<Banner>>;

    /// Atomically adds `amount` to a counter and returns the new value
    async fn increment_counter(
        &self,
        banner_id: i64,
        field: CounterField,
        amount: i64,
    ) -> Result<i64>;

    async fn set_active(&self, banner_id: i64, active: bool) -> Result<()>;

    async fn create_click_event(&self, record: NewClickEvent) -> Result<ClickEvent>;

    async fn get_banner(&self, banner_id: i64) -> Result<Option<Banner>>;

    async fn find_place_by_slug(&self, slug: &str) -> Result<Option<Place>>;
}
