//! Selection, impression and click commands

use colored::Colorize;

use super::helpers::banner_line;
use crate::engine::ClickMeta;
use crate::errors::RotatorError;
use crate::interfaces::cli::CliError;
use crate::services::RotationService;
use crate::storage::{BannerStore, SeaOrmStorage};

pub fn click_meta(
    ip: Option<String>,
    user_agent: Option<String>,
    referrer: Option<String>,
    user: Option<i64>,
) -> ClickMeta {
    ClickMeta {
        user_id: user,
        ip,
        user_agent,
        referrer,
    }
}

pub async fn select_banner(service: &RotationService, place: &str) -> Result<(), CliError> {
    match service.select(place).await {
        Ok(banner) => {
            println!("{}", banner_line(&banner));
            Ok(())
        }
        Err(e) if e.is_empty_result() => {
            println!("{} Nothing to show for '{}'", "ℹ".bold().blue(), place);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn serve_banner(service: &RotationService, place: &str) -> Result<(), CliError> {
    match service.serve(place).await {
        Ok(banner) => {
            println!("{}", banner_line(&banner));
            if !banner.is_active {
                println!(
                    "{} Banner #{} reached its cap and was deactivated",
                    "ℹ".bold().yellow(),
                    banner.id
                );
            }
            Ok(())
        }
        Err(e) if e.is_empty_result() => {
            println!("{} Nothing to show for '{}'", "ℹ".bold().blue(), place);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn record_impression(service: &RotationService, banner_id: i64) -> Result<(), CliError> {
    let banner = service.record_impression(banner_id).await?;
    println!(
        "{} Impression recorded: #{} views {}{}",
        "✓".bold().green(),
        banner.id,
        banner.views_display(),
        if banner.is_active { "" } else { " (deactivated)" }
    );
    Ok(())
}

pub async fn record_click(
    service: &RotationService,
    banner_id: i64,
    meta: ClickMeta,
) -> Result<(), CliError> {
    let event = service.click(banner_id, meta).await?;
    println!(
        "{} Click #{} recorded for banner #{} at {}",
        "✓".bold().green(),
        event.id,
        event.banner_id,
        event.clicked_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}

pub async fn list_clicks(
    storage: &SeaOrmStorage,
    banner_id: i64,
    limit: u64,
) -> Result<(), CliError> {
    let banner = storage.get_banner(banner_id).await?.ok_or_else(|| {
        RotatorError::banner_not_found(format!("banner {} does not exist", banner_id))
    })?;
    let clicks = storage.list_clicks(banner_id, limit).await?;

    println!(
        "{} Banner #{} {}: clicks {}",
        "ℹ".bold().blue(),
        banner.id,
        banner.name.cyan(),
        banner.clicks_display()
    );
    for click in &clicks {
        println!(
            "  {} {} {} {}",
            click.clicked_at.format("%Y-%m-%d %H:%M:%S"),
            click.ip_address.as_deref().unwrap_or("-"),
            click
                .referrer
                .as_deref()
                .unwrap_or("-")
                .dimmed(),
            click.user_agent.as_deref().unwrap_or("-").dimmed()
        );
    }
    Ok(())
}
