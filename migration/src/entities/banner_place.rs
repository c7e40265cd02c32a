//! Many-to-many link between banners and places

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "banner_places")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub banner_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub place_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
