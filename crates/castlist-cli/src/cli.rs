use std::path::PathBuf;

use castlist_core::favorites::FavoriteSort;
use castlist_core::pipeline::ShowSort;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "castlist", version, about = "Browse podcasts and keep favorite episodes")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for favorites and session data.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the catalog, optionally filtered, searched and sorted.
    Shows(ShowsArgs),
    /// Show one podcast with the episodes of a season.
    Show {
        id: String,
        /// Season to list (defaults to the first one).
        #[arg(long)]
        season: Option<u32>,
    },
    /// List the genre names accepted by `shows --genre`.
    Genres,
    /// Recommended shows.
    Recommended {
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Manage favorite episodes.
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Create an account with the auth provider.
    Signup(Credentials),
    /// Sign in with the auth provider.
    Login(Credentials),
    /// Forget the stored session.
    Logout,
}

#[derive(Debug, Args)]
pub struct ShowsArgs {
    /// Genre name, or "All".
    #[arg(long, default_value = "All")]
    pub genre: String,
    /// Fuzzy title search.
    #[arg(long, default_value = "")]
    pub search: String,
    /// none, a-z, z-a, ascending, descending (default from config).
    #[arg(long, value_parser = parse_show_sort)]
    pub sort: Option<ShowSort>,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// Favorites grouped by show.
    List {
        /// az, za, recently-added, least-added (default from config).
        #[arg(long, value_parser = parse_favorite_sort)]
        sort: Option<FavoriteSort>,
    },
    /// Favorite an episode.
    Add {
        show_id: String,
        season: u32,
        episode: u32,
    },
    /// Remove a favorite by key.
    Remove { key: String },
    /// Remove every favorite.
    Clear,
}

#[derive(Debug, Args)]
pub struct Credentials {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "CASTLIST_PASSWORD", hide_env_values = true)]
    pub password: String,
}

fn parse_show_sort(s: &str) -> Result<ShowSort, String> {
    s.parse().map_err(|e: castlist_core::pipeline::UnknownSort| e.to_string())
}

fn parse_favorite_sort(s: &str) -> Result<FavoriteSort, String> {
    s.parse().map_err(|e: castlist_core::pipeline::UnknownSort| e.to_string())
}
