//! Banner rotation tables
//!
//! Creates campaigns, places, banners and the banner/place link table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaigns::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Campaigns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Places::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Places::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Places::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Places::Width).integer().null())
                    .col(ColumnDef::new(Places::Height).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Banners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Banners::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Banners::CampaignId).big_integer().null())
                    .col(ColumnDef::new(Banners::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Banners::Alt)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Banners::Url).text().not_null())
                    .col(
                        ColumnDef::new(Banners::UrlTarget)
                            .string_len(10)
                            .not_null()
                            .default("_self"),
                    )
                    .col(
                        ColumnDef::new(Banners::File)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Banners::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Banners::MaxViews)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Banners::ClickCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Banners::MaxClicks)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Banners::Weight)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Banners::StartAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Banners::FinishAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Banners::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Banners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Banners::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_banners_campaign_id")
                    .table(Banners::Table)
                    .col(Banners::CampaignId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BannerPlaces::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BannerPlaces::BannerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BannerPlaces::PlaceId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(BannerPlaces::BannerId)
                            .col(BannerPlaces::PlaceId),
                    )
                    .to_owned(),
            )
            .await?;

        // 按 place 查找候选 banner
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_banner_places_place_id")
                    .table(BannerPlaces::Table)
                    .col(BannerPlaces::PlaceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_banner_places_place_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(BannerPlaces::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_banners_campaign_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Banners::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Places::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Campaigns {
    #[sea_orm(iden = "campaigns")]
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Places {
    #[sea_orm(iden = "places")]
    Table,
    Id,
    Name,
    Slug,
    Width,
    Height,
}

#[derive(DeriveIden)]
enum Banners {
    #[sea_orm(iden = "banners")]
    Table,
    Id,
    CampaignId,
    Name,
    Alt,
    Url,
    UrlTarget,
    File,
    Views,
    MaxViews,
    ClickCount,
    MaxClicks,
    Weight,
    StartAt,
    FinishAt,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BannerPlaces {
    #[sea_orm(iden = "banner_places")]
    Table,
    BannerId,
    PlaceId,
}
