//! Campaign management commands

use colored::Colorize;

use crate::cli::CampaignCommands;
use crate::interfaces::cli::CliError;
use crate::storage::SeaOrmStorage;

pub async fn run_campaign_command(
    storage: &SeaOrmStorage,
    action: CampaignCommands,
) -> Result<(), CliError> {
    match action {
        CampaignCommands::Add { name } => {
            let campaign = storage.create_campaign(&name).await?;
            println!(
                "{} Added campaign #{}: {}",
                "✓".bold().green(),
                campaign.id,
                campaign.name.cyan()
            );
        }
        CampaignCommands::List => {
            let campaigns = storage.list_campaigns().await?;
            if campaigns.is_empty() {
                println!("{} No campaigns found", "ℹ".bold().blue());
            }
            for campaign in campaigns {
                println!(
                    "  #{} {} {}",
                    campaign.id,
                    campaign.name.cyan(),
                    campaign
                        .created_at
                        .format("(created %Y-%m-%d)")
                        .to_string()
                        .dimmed()
                );
            }
        }
    }
    Ok(())
}
