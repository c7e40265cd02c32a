//! Eligibility rules for a banner at a place and instant
//!
//! A banner is eligible iff it is active, attached to the place, below both
//! of its positive caps (a cap of 0 means unlimited), and `now` lies inside
//! its optional `[start_at, finish_at]` window (both ends inclusive).

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::storage::models::Banner;

/// First rule a banner fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    Inactive,
    WrongPlace,
    ViewCapReached,
    ClickCapReached,
    NotStarted,
    Finished,
}

pub fn check(banner: &Banner, place_id: i64, now: DateTime<Utc>) -> Result<(), Ineligible> {
    if !banner.is_active {
        return Err(Ineligible::Inactive);
    }
    if !banner.places.contains(&place_id) {
        return Err(Ineligible::WrongPlace);
    }
    if banner.max_views > 0 && banner.views >= banner.max_views {
        return Err(Ineligible::ViewCapReached);
    }
    if banner.max_clicks > 0 && banner.click_count >= banner.max_clicks {
        return Err(Ineligible::ClickCapReached);
    }
    if let Some(start_at) = banner.start_at
        && start_at > now
    {
        return Err(Ineligible::NotStarted);
    }
    if let Some(finish_at) = banner.finish_at
        && finish_at < now
    {
        return Err(Ineligible::Finished);
    }
    Ok(())
}

pub fn is_eligible(banner: &Banner, place_id: i64, now: DateTime<Utc>) -> bool {
    check(banner, place_id, now).is_ok()
}

/// Keeps the eligible banners, ordered by id
pub fn eligible<I>(banners: I, place_id: i64, now: DateTime<Utc>) -> Vec<Banner>
where
    I: IntoIterator<Item = Banner>,
{
    let mut candidates: Vec<Banner> = banners
        .into_iter()
        .filter(|banner| match check(banner, place_id, now) {
            Ok(()) => true,
            Err(reason) => {
                trace!(
                    "Banner {} skipped for place {}: {:?}",
                    banner.id, place_id, reason
                );
                false
            }
        })
        .collect();
    candidates.sort_by_key(|banner| banner.id);
    candidates
}
