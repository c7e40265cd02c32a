use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use tracing::warn;

use crate::storage::models::{
    Banner, Campaign, ClickEvent, NewBanner, NewClickEvent, NewPlace, Place, UrlTarget,
};
use migration::entities::{banner, banner_click, campaign, place};

/// 将 banner Model 转换为 Banner
///
/// Negative counters read back as 0; an unknown `url_target` falls back to `_self`.
pub fn model_to_banner(model: banner::Model, places: BTreeSet<i64>) -> Banner {
    let url_target = model.url_target.parse::<UrlTarget>().unwrap_or_else(|e| {
        warn!("Banner {}: {}; using _self", model.id, e);
        UrlTarget::default()
    });

    Banner {
        id: model.id,
        campaign_id: model.campaign_id,
        name: model.name,
        alt: model.alt,
        url: model.url,
        url_target,
        file: model.file,
        places,
        weight: i64::from(model.weight),
        views: model.views.max(0),
        max_views: model.max_views.max(0),
        click_count: model.click_count.max(0),
        max_clicks: model.max_clicks.max(0),
        start_at: model.start_at,
        finish_at: model.finish_at,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn new_banner_to_active_model(input: &NewBanner, now: DateTime<Utc>) -> banner::ActiveModel {
    banner::ActiveModel {
        id: NotSet,
        campaign_id: Set(input.campaign_id),
        name: Set(input.name.trim().to_string()),
        alt: Set(input.alt.clone()),
        url: Set(input.url.clone()),
        url_target: Set(input.url_target.as_ref().to_string()),
        file: Set(input.file.clone()),
        views: Set(0),
        max_views: Set(input.max_views),
        click_count: Set(0),
        max_clicks: Set(input.max_clicks),
        weight: Set(input.weight),
        start_at: Set(input.start_at),
        finish_at: Set(input.finish_at),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

pub fn model_to_place(model: place::Model) -> Place {
    Place {
        id: model.id,
        name: model.name,
        slug: model.slug,
        width: model.width,
        height: model.height,
    }
}

pub fn new_place_to_active_model(input: &NewPlace) -> place::ActiveModel {
    place::ActiveModel {
        id: NotSet,
        name: Set(input.name.trim().to_string()),
        slug: Set(input.slug.clone()),
        width: Set(input.width),
        height: Set(input.height),
    }
}

pub fn model_to_campaign(model: campaign::Model) -> Campaign {
    Campaign {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn model_to_click_event(model: banner_click::Model) -> ClickEvent {
    ClickEvent {
        id: model.id,
        banner_id: model.banner_id,
        user_id: model.user_id,
        clicked_at: model.clicked_at,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        referrer: model.referrer,
    }
}

pub fn new_click_to_active_model(record: &NewClickEvent) -> banner_click::ActiveModel {
    banner_click::ActiveModel {
        id: NotSet,
        banner_id: Set(record.banner_id),
        user_id: Set(record.user_id),
        clicked_at: Set(record.clicked_at),
        ip_address: Set(record.ip_address.clone()),
        user_agent: Set(record.user_agent.clone()),
        referrer: Set(record.referrer.clone()),
    }
}
