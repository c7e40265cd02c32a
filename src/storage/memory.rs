//! In-memory [`BannerStore`]
//!
//! Banners live in a `DashMap`; an increment mutates the entry while holding
//! its shard lock, so concurrent increments on one banner never lose updates.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::errors::{Result, RotatorError};
use crate::storage::BannerStore;
use crate::storage::models::{Banner, ClickEvent, CounterField, NewClickEvent, Place};

#[derive(Default)]
pub struct MemoryStore {
    banners: DashMap<i64, Banner>,
    places: DashMap<i64, Place>,
    clicks: RwLock<Vec<ClickEvent>>,
    next_banner_id: AtomicI64,
    next_place_id: AtomicI64,
    next_click_id: AtomicI64,
    /// 模拟存储故障
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a place; an id of 0 gets the next free id
    pub fn insert_place(&self, mut place: Place) -> Place {
        if place.id == 0 {
            place.id = self.next_place_id.fetch_add(1, Ordering::Relaxed) + 1;
        } else {
            self.next_place_id.fetch_max(place.id, Ordering::Relaxed);
        }
        self.places.insert(place.id, place.clone());
        place
    }

    /// Stores a banner as-is; an id of 0 gets the next free id
    pub fn insert_banner(&self, mut banner: Banner) -> Banner {
        if banner.id == 0 {
            banner.id = self.next_banner_id.fetch_add(1, Ordering::Relaxed) + 1;
        } else {
            self.next_banner_id.fetch_max(banner.id, Ordering::Relaxed);
        }
        self.banners.insert(banner.id, banner.clone());
        banner
    }

    pub fn banner(&self, banner_id: i64) -> Option<Banner> {
        self.banners.get(&banner_id).map(|b| b.value().clone())
    }

    pub fn clicks_for(&self, banner_id: i64) -> Vec<ClickEvent> {
        self.clicks
            .read()
            .iter()
            .filter(|c| c.banner_id == banner_id)
            .cloned()
            .collect()
    }

    /// Makes every store call fail with `StoreUnavailable` while set
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::Relaxed) {
            Err(RotatorError::store_unavailable("memory store marked unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BannerStore for MemoryStore {
    async fn fetch_banners_for_place(&self, place_id: i64) -> Result<Vec<Banner>> {
        self.ensure_available()?;
        Ok(self
            .banners
            .iter()
            .filter(|entry| entry.places.contains(&place_id))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn increment_counter(
        &self,
        banner_id: i64,
        field: CounterField,
        amount: i64,
    ) -> Result<i64> {
        self.ensure_available()?;
        let mut entry = self.banners.get_mut(&banner_id).ok_or_else(|| {
            RotatorError::banner_not_found(format!("banner {} does not exist", banner_id))
        })?;

        let counter = match field {
            CounterField::Views => &mut entry.views,
            CounterField::ClickCount => &mut entry.click_count,
        };
        *counter = counter.saturating_add(amount);
        let value = *counter;
        entry.updated_at = Utc::now();
        Ok(value)
    }

    async fn set_active(&self, banner_id: i64, active: bool) -> Result<()> {
        self.ensure_available()?;
        let mut entry = self.banners.get_mut(&banner_id).ok_or_else(|| {
            RotatorError::banner_not_found(format!("banner {} does not exist", banner_id))
        })?;
        entry.is_active = active;
        entry.updated_at = Utc::now();
        Ok(())
    }

    async fn create_click_event(&self, record: NewClickEvent) -> Result<ClickEvent> {
        self.ensure_available()?;
        let id = self.next_click_id.fetch_add(1, Ordering::Relaxed) + 1;
        let event = record.into_event(id);
        self.clicks.write().push(event.clone());
        Ok(event)
    }

    async fn get_banner(&self, banner_id: i64) -> Result<Option<Banner>> {
        self.ensure_available()?;
        Ok(self.banner(banner_id))
    }

    async fn find_place_by_slug(&self, slug: &str) -> Result<Option<Place>> {
        self.ensure_available()?;
        Ok(self
            .places
            .iter()
            .find(|entry| entry.slug == slug)
            .map(|entry| entry.value().clone()))
    }
}
