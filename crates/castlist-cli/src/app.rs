use std::path::PathBuf;

use castlist_api::auth::{AuthClient, AuthError, Session};
use castlist_api::{CatalogService, PodcastApiClient};
use castlist_core::config::{AppConfig, StorageBackend};
use castlist_core::favorites::{group_by_show, sort_groups, FavoritesStore};
use castlist_core::loader::CatalogLoader;
use castlist_core::models::{FavoriteEntry, LoadStatus};
use castlist_core::pipeline;
use castlist_core::storage::{FileStore, KeyValueStore, SqliteStore};
use tracing::debug;

use crate::cli::{Command, Credentials, FavoritesCommand, ShowsArgs};
use crate::error::CliError;
use crate::render;

/// Storage key for the auth session.
const SESSION_KEY: &str = "session";

pub struct App<C> {
    config: AppConfig,
    storage: Box<dyn KeyValueStore>,
    loader: CatalogLoader<C>,
}

impl App<PodcastApiClient> {
    /// Build the app from config, opening the configured storage backend.
    pub fn open(config: AppConfig, data_dir: Option<PathBuf>) -> Result<Self, CliError> {
        let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
        debug!(dir = %data_dir.display(), backend = ?config.storage.backend, "opening storage");

        let storage: Box<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::File => Box::new(FileStore::open(&data_dir)?),
            StorageBackend::Sqlite => Box::new(SqliteStore::open(&data_dir.join("castlist.db"))?),
        };
        let client = PodcastApiClient::new(&config.api.base_url)?;
        Ok(Self::with_parts(config, storage, client))
    }
}

impl<C: CatalogService> App<C> {
    pub fn with_parts(config: AppConfig, storage: Box<dyn KeyValueStore>, catalog: C) -> Self {
        Self {
            config,
            storage,
            loader: CatalogLoader::new(catalog),
        }
    }

    fn favorites(&self) -> FavoritesStore<&dyn KeyValueStore> {
        FavoritesStore::new(self.storage.as_ref())
    }

    /// Run one command and return the text to print.
    pub async fn run(&self, command: Command) -> Result<String, CliError> {
        match command {
            Command::Shows(args) => self.shows(args).await,
            Command::Show { id, season } => self.show(&id, season).await,
            Command::Genres => Ok(render::genres()),
            Command::Recommended { count } => {
                let shows = ready("catalog", self.loader.shows().await)?;
                Ok(render::show_list(&pipeline::recommended(&shows, count)))
            }
            Command::Favorites(cmd) => self.favorites_command(cmd).await,
            Command::Signup(creds) => self.sign_up(creds).await,
            Command::Login(creds) => self.log_in(creds).await,
            Command::Logout => {
                self.storage.delete(SESSION_KEY)?;
                Ok("Signed out.\n".to_string())
            }
        }
    }

    async fn shows(&self, args: ShowsArgs) -> Result<String, CliError> {
        let sort = match args.sort {
            Some(sort) => sort,
            None => self.config.show_sort()?,
        };
        let shows = ready("catalog", self.loader.shows().await)?;
        let listed = pipeline::run(&shows, &args.genre, &args.search, sort);
        debug!(total = shows.len(), listed = listed.len(), %sort, "catalog filtered");
        Ok(render::show_list(&listed))
    }

    async fn show(&self, id: &str, season: Option<u32>) -> Result<String, CliError> {
        let show = ready("show", self.loader.show(id).await)?;
        let season = season
            .or_else(|| show.season_numbers().first().copied())
            .unwrap_or(1);

        let favorites = self.favorites().load_or_empty();
        let is_favorite = |episode: u32| {
            let key = FavoriteEntry::natural_key(&show.id, season, episode);
            favorites.iter().any(|f| f.key == key)
        };
        Ok(render::show_detail(&show, season, is_favorite))
    }

    async fn favorites_command(&self, cmd: FavoritesCommand) -> Result<String, CliError> {
        let store = self.favorites();
        match cmd {
            FavoritesCommand::List { sort } => {
                let sort = match sort {
                    Some(sort) => sort,
                    None => self.config.favorite_sort()?,
                };
                let entries = store.load()?;
                let groups = sort_groups(group_by_show(&entries), sort);
                Ok(render::favorites(&groups))
            }
            FavoritesCommand::Add {
                show_id,
                season,
                episode,
            } => {
                let show = ready("show", self.loader.show(&show_id).await)?;
                let found = show.episode(season, episode).ok_or_else(|| {
                    CliError::NotFound(format!(
                        "season {season} episode {episode} of show {show_id}"
                    ))
                })?;
                let entry = FavoriteEntry::from_episode(&show, season, found, chrono::Local::now());
                let message = format!("Added \"{}\" to favorites [{}]\n", entry.title, entry.key);
                store.upsert(entry)?;
                Ok(message)
            }
            FavoritesCommand::Remove { key } => {
                if store.remove(&key)? {
                    Ok(format!("Removed {key}\n"))
                } else {
                    Ok(format!("No favorite with key {key}\n"))
                }
            }
            FavoritesCommand::Clear => {
                store.clear()?;
                Ok("Cleared all favorites.\n".to_string())
            }
        }
    }

    fn auth_client(&self) -> Result<AuthClient, AuthError> {
        match (&self.config.auth.url, &self.config.auth.anon_key) {
            (Some(url), Some(key)) => AuthClient::new(url, key.clone()),
            _ => Err(AuthError::NotConfigured),
        }
    }

    async fn sign_up(&self, creds: Credentials) -> Result<String, CliError> {
        let session = self
            .auth_client()?
            .sign_up(&creds.email, &creds.password)
            .await?;
        if session.is_authenticated() {
            self.save_session(&session)?;
            Ok(format!("Account created, signed in as {}\n", creds.email))
        } else {
            Ok(format!(
                "Account created for {}. Check your email to confirm it.\n",
                creds.email
            ))
        }
    }

    async fn log_in(&self, creds: Credentials) -> Result<String, CliError> {
        let session = self
            .auth_client()?
            .sign_in_with_password(&creds.email, &creds.password)
            .await?;
        self.save_session(&session)?;
        let email = session.email().unwrap_or(&creds.email);
        Ok(format!("Signed in as {email}\n"))
    }

    fn save_session(&self, session: &Session) -> Result<(), CliError> {
        let json = serde_json::to_string(session).map_err(castlist_core::error::CastlistError::from)?;
        self.storage.set(SESSION_KEY, &json)?;
        Ok(())
    }
}

/// Unwrap a finished load, turning a failure into a visible error.
fn ready<T>(what: &str, status: LoadStatus<T>) -> Result<T, CliError> {
    match status {
        LoadStatus::Ready(value) => Ok(value),
        LoadStatus::Failed(message) => Err(CliError::Load {
            what: what.to_string(),
            message,
        }),
        LoadStatus::Pending => Err(CliError::Load {
            what: what.to_string(),
            message: "still loading".to_string(),
        }),
    }
}
