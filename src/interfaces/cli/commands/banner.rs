//! Banner management commands

use chrono::Utc;
use colored::Colorize;

use super::helpers::{banner_line, parse_time_arg};
use crate::cli::BannerCommands;
use crate::interfaces::cli::CliError;
use crate::storage::{BannerStore, NewBanner, SeaOrmStorage, UrlTarget};

pub async fn run_banner_command(
    storage: &SeaOrmStorage,
    action: BannerCommands,
) -> Result<(), CliError> {
    match action {
        BannerCommands::Add {
            name,
            url,
            places,
            weight,
            max_views,
            max_clicks,
            start,
            finish,
            campaign,
            file,
            alt,
            blank,
        } => {
            let now = Utc::now();
            let start_at = parse_time_arg("start", start.as_deref(), now)?;
            let finish_at = parse_time_arg("finish", finish.as_deref(), now)?;

            let mut place_ids = Vec::with_capacity(places.len());
            for slug in &places {
                let place = storage.find_place_by_slug(slug).await?.ok_or_else(|| {
                    CliError::CommandError(format!("Place '{}' does not exist", slug))
                })?;
                place_ids.push(place.id);
            }

            let mut input = NewBanner::new(name, url)
                .with_places(place_ids)
                .with_weight(weight)
                .with_caps(max_views, max_clicks)
                .with_window(start_at, finish_at);
            input.campaign_id = campaign;
            input.file = file.unwrap_or_default();
            input.alt = alt.unwrap_or_default();
            if blank {
                input.url_target = UrlTarget::Blank;
            }

            let banner = storage.create_banner(input).await?;
            println!("{} Added banner: {}", "✓".bold().green(), banner_line(&banner));
            Ok(())
        }
        BannerCommands::List => {
            let banners = storage.list_banners().await?;
            if banners.is_empty() {
                println!("{} No banners found", "ℹ".bold().blue());
                return Ok(());
            }
            for banner in &banners {
                println!("  {}", banner_line(banner));
            }
            println!();
            println!(
                "{} Total {} banners",
                "ℹ".bold().blue(),
                banners.len().to_string().green()
            );
            Ok(())
        }
    }
}
