//! Counter increments and the cap-exhaustion transition
//!
//! The increment itself is atomic in the store. The deactivation that
//! follows is a second write, so workers that fetched the banner before it
//! lands can still serve it a few more times. `is_active` is eventually
//! consistent; counters are exact.

use tracing::info;

use crate::errors::Result;
use crate::storage::BannerStore;
use crate::storage::models::{Banner, CounterField};

/// Result of one counter bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterUpdate {
    /// Post-increment value
    pub value: i64,
    /// This bump switched the banner off
    pub deactivated: bool,
}

/// `cap > 0` and the counter has reached it
pub fn cap_reached(value: i64, cap: i64) -> bool {
    cap > 0 && value >= cap
}

/// Adds 1 to `field` and deactivates the banner if the new value reaches its cap
pub async fn bump(
    store: &dyn BannerStore,
    banner: &Banner,
    field: CounterField,
) -> Result<CounterUpdate> {
    let value = store.increment_counter(banner.id, field, 1).await?;
    let cap = banner.cap(field);

    let deactivated = banner.is_active && cap_reached(value, cap);
    if deactivated {
        store.set_active(banner.id, false).await?;
        info!(
            "Banner {} deactivated: {} reached {}/{}",
            banner.id,
            field.as_ref(),
            value,
            cap
        );
    }

    Ok(CounterUpdate { value, deactivated })
}
