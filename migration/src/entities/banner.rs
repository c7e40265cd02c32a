//! Banner entity: one advertising unit with its counters and caps

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "banners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub campaign_id: Option<i64>,
    pub name: String,
    pub alt: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    /// `_self` or `_blank`
    pub url_target: String,
    pub file: String,
    pub views: i64,
    /// 0 means unlimited
    pub max_views: i64,
    pub click_count: i64,
    /// 0 means unlimited
    pub max_clicks: i64,
    pub weight: i32,
    pub start_at: Option<DateTimeUtc>,
    pub finish_at: Option<DateTimeUtc>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
