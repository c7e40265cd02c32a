//! CLI interface module
//!
//! Runs clap-parsed commands against the configured database.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::RotatorError;
use crate::services::RotationService;
use crate::storage::{BannerStore, SeaOrmStorage, StorageFactory};
use commands::{banner, campaign, config_gen, place, rotation};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<RotatorError> for CliError {
    fn from(err: RotatorError) -> Self {
        match err {
            RotatorError::StoreUnavailable(_)
            | RotatorError::DatabaseConfig(_)
            | RotatorError::DatabaseConnection(_) => CliError::StorageError(err.format_simple()),
            RotatorError::Validation(_) => CliError::ParseError(err.format_simple()),
            _ => CliError::CommandError(err.format_simple()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    match cmd {
        // 生成配置不需要数据库
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_gen::config_generate(output_path, force),
        Commands::Place { action } => {
            place::run_place_command(&*open_storage(config).await?, action).await
        }
        Commands::Campaign { action } => {
            campaign::run_campaign_command(&*open_storage(config).await?, action).await
        }
        Commands::Banner { action } => {
            banner::run_banner_command(&*open_storage(config).await?, action).await
        }
        Commands::Select { place } => {
            rotation::select_banner(&rotation_service(config).await?, &place).await
        }
        Commands::Serve { place } => {
            rotation::serve_banner(&rotation_service(config).await?, &place).await
        }
        Commands::Impression { banner_id } => {
            rotation::record_impression(&rotation_service(config).await?, banner_id).await
        }
        Commands::Click {
            banner_id,
            ip,
            user_agent,
            referrer,
            user,
        } => {
            let meta = rotation::click_meta(ip, user_agent, referrer, user);
            rotation::record_click(&rotation_service(config).await?, banner_id, meta).await
        }
        Commands::Clicks { banner_id, limit } => {
            rotation::list_clicks(&*open_storage(config).await?, banner_id, limit).await
        }
    }
}

async fn open_storage(config: &StaticConfig) -> Result<Arc<SeaOrmStorage>, CliError> {
    Ok(StorageFactory::create(&config.database).await?)
}

async fn rotation_service(config: &StaticConfig) -> Result<RotationService, CliError> {
    let storage: Arc<dyn BannerStore> = open_storage(config).await?;
    Ok(RotationService::from_config(storage, &config.rotator))
}
