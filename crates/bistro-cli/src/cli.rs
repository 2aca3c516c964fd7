use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bistro")]
#[command(about = "Browse restaurants and reviews, online or off")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the local store file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Restaurant API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List restaurants, best-known state (remote when reachable, else cache)
    List {
        /// Filter by cuisine type ("all" matches everything)
        #[arg(long, default_value = "all")]
        cuisine: String,
        /// Filter by neighborhood ("all" matches everything)
        #[arg(long, default_value = "all")]
        neighborhood: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one restaurant with its reviews
    Show {
        /// Restaurant id
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List distinct neighborhoods
    Neighborhoods {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List distinct cuisines
    Cuisines {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark or unmark a restaurant as a favorite
    Favorite {
        /// Restaurant id
        id: u32,
        /// New favorite state
        favorite: bool,
    },
    /// Submit a review for a restaurant
    Review {
        /// Restaurant id
        id: u32,
        /// Reviewer name
        #[arg(long)]
        name: String,
        /// Rating from 1 to 5
        #[arg(long)]
        rating: u8,
        /// Review text
        #[arg(long, default_value = "")]
        comments: String,
    },
    /// Show queued offline changes waiting to sync
    Outbox {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay queued changes against the remote API now
    Sync,
}
