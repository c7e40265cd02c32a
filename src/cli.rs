//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Banner rotator - weighted banner selection with view/click caps
#[derive(Parser)]
#[command(name = "banner-rotator")]
#[command(version)]
#[command(about = "Weighted banner rotation with view and click caps", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage places
    Place {
        #[command(subcommand)]
        action: PlaceCommands,
    },

    /// Manage campaigns
    Campaign {
        #[command(subcommand)]
        action: CampaignCommands,
    },

    /// Manage banners
    Banner {
        #[command(subcommand)]
        action: BannerCommands,
    },

    /// Choose a banner for a place (does not count an impression)
    Select {
        /// Place slug
        place: String,
    },

    /// Choose a banner for a place and count one impression
    Serve {
        /// Place slug
        place: String,
    },

    /// Count one impression for a banner
    Impression { banner_id: i64 },

    /// Record a click on a banner
    Click {
        banner_id: i64,

        /// Client IP address
        #[arg(long)]
        ip: Option<String>,

        /// Client User-Agent
        #[arg(long)]
        user_agent: Option<String>,

        /// Referring page
        #[arg(long)]
        referrer: Option<String>,

        /// Logged-in user id
        #[arg(long)]
        user: Option<i64>,
    },

    /// Show recent clicks of a banner
    Clicks {
        banner_id: i64,

        /// Maximum rows to show
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum PlaceCommands {
    /// Add a place
    Add {
        /// Unique slug (lowercase letters, digits, '-' and '_')
        slug: String,

        /// Display name
        name: String,

        /// Preferred width in pixels
        #[arg(long)]
        width: Option<i32>,

        /// Preferred height in pixels
        #[arg(long)]
        height: Option<i32>,
    },

    /// List places
    List,
}

#[derive(Subcommand)]
pub enum CampaignCommands {
    /// Add a campaign
    Add { name: String },

    /// List campaigns
    List,
}

#[derive(Subcommand)]
pub enum BannerCommands {
    /// Add a banner
    Add {
        /// Display name
        name: String,

        /// Click-through URL (http/https)
        url: String,

        /// Place slug; repeat for several places
        #[arg(long = "place", required = true)]
        places: Vec<String>,

        /// Relative weight (1-10)
        #[arg(long, default_value_t = crate::storage::models::DEFAULT_WEIGHT)]
        weight: i32,

        /// View cap, 0 = unlimited
        #[arg(long, default_value_t = 0)]
        max_views: i64,

        /// Click cap, 0 = unlimited
        #[arg(long, default_value_t = 0)]
        max_clicks: i64,

        /// Start of the display window (RFC3339 or relative like "1d", "2h")
        #[arg(long)]
        start: Option<String>,

        /// End of the display window (RFC3339 or relative like "30d")
        #[arg(long)]
        finish: Option<String>,

        /// Campaign id
        #[arg(long)]
        campaign: Option<i64>,

        /// Image or media file
        #[arg(long)]
        file: Option<String>,

        /// Alt text
        #[arg(long)]
        alt: Option<String>,

        /// Open the link in a new window
        #[arg(long)]
        blank: bool,
    },

    /// List banners
    List,
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
