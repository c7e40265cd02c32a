//! Query operations for SeaOrmStorage
//!
//! Read-only database operations. Banner rows are joined with their place
//! links in a second query so each [`Banner`] carries its full place set.

use std::collections::{BTreeSet, HashMap};

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::debug;

use super::converters::{model_to_banner, model_to_campaign, model_to_click_event, model_to_place};
use super::{SeaOrmStorage, retry};
use crate::errors::Result;
use crate::storage::models::{Banner, Campaign, ClickEvent, Place};

use migration::entities::{banner, banner_click, banner_place, campaign, place};

/// banner_id -> place ids
async fn load_place_sets<C: ConnectionTrait>(
    db: &C,
    banner_ids: &[i64],
) -> std::result::Result<HashMap<i64, BTreeSet<i64>>, DbErr> {
    let mut sets: HashMap<i64, BTreeSet<i64>> = HashMap::new();
    if banner_ids.is_empty() {
        return Ok(sets);
    }

    let links = banner_place::Entity::find()
        .filter(banner_place::Column::BannerId.is_in(banner_ids.iter().copied()))
        .all(db)
        .await?;
    for link in links {
        sets.entry(link.banner_id).or_default().insert(link.place_id);
    }
    Ok(sets)
}

/// 将 banner 行与其 place 集合组装
pub(super) async fn assemble_banners<C: ConnectionTrait>(
    db: &C,
    models: Vec<banner::Model>,
) -> std::result::Result<Vec<Banner>, DbErr> {
    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let mut sets = load_place_sets(db, &ids).await?;
    Ok(models
        .into_iter()
        .map(|model| {
            let places = sets.remove(&model.id).unwrap_or_default();
            model_to_banner(model, places)
        })
        .collect())
}

pub(super) async fn find_banner<C: ConnectionTrait>(
    db: &C,
    banner_id: i64,
) -> std::result::Result<Option<Banner>, DbErr> {
    match banner::Entity::find_by_id(banner_id).one(db).await? {
        Some(model) => Ok(assemble_banners(db, vec![model]).await?.pop()),
        None => Ok(None),
    }
}

impl SeaOrmStorage {
    /// Every banner linked to `place_id`, ordered by id
    pub(super) async fn query_banners_for_place(&self, place_id: i64) -> Result<Vec<Banner>> {
        let db = &self.db;
        let banners = retry::with_retry(
            &format!("fetch_banners_for_place({})", place_id),
            self.retry_config,
            || async move {
                let ids: Vec<i64> = banner_place::Entity::find()
                    .filter(banner_place::Column::PlaceId.eq(place_id))
                    .select_only()
                    .column(banner_place::Column::BannerId)
                    .into_tuple::<i64>()
                    .all(db)
                    .await?;
                if ids.is_empty() {
                    return Ok(Vec::new());
                }

                let models = banner::Entity::find()
                    .filter(banner::Column::Id.is_in(ids))
                    .order_by_asc(banner::Column::Id)
                    .all(db)
                    .await?;
                assemble_banners(db, models).await
            },
        )
        .await?;

        debug!("Place {}: loaded {} banners", place_id, banners.len());
        Ok(banners)
    }

    pub(super) async fn query_banner(&self, banner_id: i64) -> Result<Option<Banner>> {
        let db = &self.db;
        Ok(retry::with_retry(
            &format!("get_banner({})", banner_id),
            self.retry_config,
            || find_banner(db, banner_id),
        )
        .await?)
    }

    pub(super) async fn query_place_by_slug(&self, slug: &str) -> Result<Option<Place>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("find_place_by_slug({})", slug),
            self.retry_config,
            || async move {
                place::Entity::find()
                    .filter(place::Column::Slug.eq(slug))
                    .one(db)
                    .await
            },
        )
        .await?;
        Ok(model.map(model_to_place))
    }

    /// All banners, ordered by id
    pub async fn list_banners(&self) -> Result<Vec<Banner>> {
        let db = &self.db;
        Ok(
            retry::with_retry("list_banners", self.retry_config, || async move {
                let models = banner::Entity::find()
                    .order_by_asc(banner::Column::Id)
                    .all(db)
                    .await?;
                assemble_banners(db, models).await
            })
            .await?,
        )
    }

    pub async fn list_places(&self) -> Result<Vec<Place>> {
        let db = &self.db;
        let models = retry::with_retry("list_places", self.retry_config, || async move {
            place::Entity::find()
                .order_by_asc(place::Column::Id)
                .all(db)
                .await
        })
        .await?;
        Ok(models.into_iter().map(model_to_place).collect())
    }

    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let db = &self.db;
        let models = retry::with_retry("list_campaigns", self.retry_config, || async move {
            campaign::Entity::find()
                .order_by_asc(campaign::Column::Id)
                .all(db)
                .await
        })
        .await?;
        Ok(models.into_iter().map(model_to_campaign).collect())
    }

    /// Most recent clicks of a banner first
    pub async fn list_clicks(&self, banner_id: i64, limit: u64) -> Result<Vec<ClickEvent>> {
        let db = &self.db;
        let models = retry::with_retry(
            &format!("list_clicks({})", banner_id),
            self.retry_config,
            || async move {
                banner_click::Entity::find()
                    .filter(banner_click::Column::BannerId.eq(banner_id))
                    .order_by_desc(banner_click::Column::ClickedAt)
                    .order_by_desc(banner_click::Column::Id)
                    .limit(limit)
                    .all(db)
                    .await
            },
        )
        .await?;
        Ok(models.into_iter().map(model_to_click_event).collect())
    }
}
