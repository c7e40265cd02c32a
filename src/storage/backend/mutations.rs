//! Mutation operations for SeaOrmStorage
//!
//! Administrative writes (campaigns, places, banners) plus the counter and
//! click writes the rotation engine needs.

use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter,
    TransactionTrait,
};
use tracing::info;

use super::converters::{
    model_to_banner, model_to_campaign, model_to_click_event, model_to_place,
    new_banner_to_active_model, new_click_to_active_model, new_place_to_active_model,
};
use super::{SeaOrmStorage, retry};
use crate::errors::{Result, RotatorError};
use crate::storage::models::{
    Banner, Campaign, ClickEvent, CounterField, NewBanner, NewClickEvent, NewPlace, Place,
};

use migration::entities::{banner, banner_place, campaign, place};

fn counter_column(field: CounterField) -> banner::Column {
    match field {
        CounterField::Views => banner::Column::Views,
        CounterField::ClickCount => banner::Column::ClickCount,
    }
}

impl SeaOrmStorage {
    pub async fn create_campaign(&self, name: &str) -> Result<Campaign> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RotatorError::validation("Campaign name must not be empty"));
        }

        let now = Utc::now();
        let model = campaign::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Campaign created: {} ({})", model.name, model.id);
        Ok(model_to_campaign(model))
    }

    pub async fn create_place(&self, input: NewPlace) -> Result<Place> {
        input.validate().map_err(RotatorError::validation)?;

        let taken = place::Entity::find()
            .filter(place::Column::Slug.eq(input.slug.as_str()))
            .count(&self.db)
            .await?;
        if taken > 0 {
            return Err(RotatorError::validation(format!(
                "Place slug '{}' already exists",
                input.slug
            )));
        }

        let model = new_place_to_active_model(&input).insert(&self.db).await?;
        info!("Place created: {} ({})", model.slug, model.id);
        Ok(model_to_place(model))
    }

    /// Validates and inserts a banner together with its place links
    pub async fn create_banner(&self, input: NewBanner) -> Result<Banner> {
        input.validate().map_err(RotatorError::validation)?;

        let places: BTreeSet<i64> = input.places.iter().copied().collect();
        let known = place::Entity::find()
            .filter(place::Column::Id.is_in(places.iter().copied()))
            .count(&self.db)
            .await?;
        if known != places.len() as u64 {
            return Err(RotatorError::place_not_found(format!(
                "Some of places {:?} do not exist",
                places
            )));
        }

        if let Some(campaign_id) = input.campaign_id
            && campaign::Entity::find_by_id(campaign_id)
                .one(&self.db)
                .await?
                .is_none()
        {
            return Err(RotatorError::validation(format!(
                "Campaign {} does not exist",
                campaign_id
            )));
        }

        let txn = self.db.begin().await?;
        let model = new_banner_to_active_model(&input, Utc::now())
            .insert(&txn)
            .await?;
        let links = places.iter().map(|&place_id| banner_place::ActiveModel {
            banner_id: Set(model.id),
            place_id: Set(place_id),
        });
        banner_place::Entity::insert_many(links)
            .exec_without_returning(&txn)
            .await?;
        txn.commit().await?;

        info!(
            "Banner created: {} ({}) weight={} places={:?}",
            model.name, model.id, model.weight, places
        );
        Ok(model_to_banner(model, places))
    }

    /// UPDATE ... SET col = col + amount, then read the new value back in the
    /// same transaction. None when the banner does not exist.
    ///
    /// Only opening the transaction is retried; the increment runs once.
    pub(super) async fn update_counter(
        &self,
        banner_id: i64,
        field: CounterField,
        amount: i64,
    ) -> Result<Option<i64>> {
        let column = counter_column(field);
        let db = &self.db;

        Ok(retry::with_retry_before_write(
            &format!("increment_counter({}, {})", banner_id, field.as_ref()),
            self.retry_config,
            || db.begin(),
            |txn| async move {
                banner::Entity::update_many()
                    .col_expr(column, Expr::col(column).add(Expr::val(amount)))
                    .col_expr(banner::Column::UpdatedAt, Expr::val(Utc::now()))
                    .filter(banner::Column::Id.eq(banner_id))
                    .exec(&txn)
                    .await?;
                let value = banner::Entity::find_by_id(banner_id)
                    .one(&txn)
                    .await?
                    .map(|model| match field {
                        CounterField::Views => model.views,
                        CounterField::ClickCount => model.click_count,
                    });
                txn.commit().await?;
                Ok::<_, DbErr>(value)
            },
        )
        .await?)
    }

    pub(super) async fn update_active(&self, banner_id: i64, active: bool) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry(
            &format!("set_active({}, {})", banner_id, active),
            self.retry_config,
            || async move {
                banner::Entity::update_many()
                    .col_expr(banner::Column::IsActive, Expr::val(active))
                    .col_expr(banner::Column::UpdatedAt, Expr::val(Utc::now()))
                    .filter(banner::Column::Id.eq(banner_id))
                    .exec(db)
                    .await
            },
        )
        .await?;

        // MySQL 在值未变化时可能报告 0 行
        if result.rows_affected == 0
            && banner::Entity::find_by_id(banner_id)
                .one(&self.db)
                .await?
                .is_none()
        {
            return Err(RotatorError::banner_not_found(format!(
                "banner {} does not exist",
                banner_id
            )));
        }
        Ok(())
    }

    /// One row per call: only opening the transaction is retried
    pub(super) async fn insert_click(&self, record: NewClickEvent) -> Result<ClickEvent> {
        let db = &self.db;
        let model = retry::with_retry_before_write(
            &format!("create_click_event({})", record.banner_id),
            self.retry_config,
            || db.begin(),
            |txn| async move {
                let model = new_click_to_active_model(&record).insert(&txn).await?;
                txn.commit().await?;
                Ok::<_, DbErr>(model)
            },
        )
        .await?;
        Ok(model_to_click_event(model))
    }
}
