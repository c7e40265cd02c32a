//! 点击记录表迁移
//!
//! 创建 banner_clicks 表，每次点击追加一行：
//! - 时间戳
//! - 来源 (referrer)
//! - 用户代理 (user_agent，最长 1000 字符)
//! - IP 地址
//! - 可选的用户 ID

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BannerClicks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BannerClicks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BannerClicks::BannerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BannerClicks::UserId).big_integer().null())
                    .col(
                        ColumnDef::new(BannerClicks::ClickedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BannerClicks::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(BannerClicks::UserAgent).text().null())
                    .col(ColumnDef::new(BannerClicks::Referrer).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_banner_clicks_banner_time")
                    .table(BannerClicks::Table)
                    .col(BannerClicks::BannerId)
                    .col(BannerClicks::ClickedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_banner_clicks_banner_time")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(BannerClicks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BannerClicks {
    #[sea_orm(iden = "banner_clicks")]
    Table,
    Id,
    BannerId,
    UserId,
    ClickedAt,
    IpAddress,
    UserAgent,
    Referrer,
}
