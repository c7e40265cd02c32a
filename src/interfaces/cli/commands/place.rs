//! Place management commands

use colored::Colorize;

use crate::cli::PlaceCommands;
use crate::interfaces::cli::CliError;
use crate::storage::{NewPlace, SeaOrmStorage};

pub async fn run_place_command(
    storage: &SeaOrmStorage,
    action: PlaceCommands,
) -> Result<(), CliError> {
    match action {
        PlaceCommands::Add {
            slug,
            name,
            width,
            height,
        } => {
            let place = storage
                .create_place(NewPlace {
                    name,
                    slug,
                    width,
                    height,
                })
                .await?;
            println!(
                "{} Added place: {} {}",
                "✓".bold().green(),
                place.slug.cyan(),
                place.to_string().dimmed()
            );
            Ok(())
        }
        PlaceCommands::List => {
            let places = storage.list_places().await?;
            if places.is_empty() {
                println!("{} No places found", "ℹ".bold().blue());
                return Ok(());
            }
            for place in &places {
                println!("  #{} {} {}", place.id, place.slug.cyan(), place);
            }
            println!();
            println!(
                "{} Total {} places",
                "ℹ".bold().blue(),
                places.len().to_string().green()
            );
            Ok(())
        }
    }
}
