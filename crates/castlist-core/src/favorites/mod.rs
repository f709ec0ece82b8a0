//! Favorites store: a flat list of [`FavoriteEntry`] kept as one JSON
//! array under a single storage key.
//!
//! Every mutation is a read-modify-write of the whole list. There is no
//! cross-process locking; concurrent writers are last-write-wins.

mod group;

pub use group::{group_by_show, sort_groups, FavoriteSort};

use tracing::{info, warn};

use crate::error::CastlistError;
use crate::models::FavoriteEntry;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized favorites array.
pub const FAVORITES_KEY: &str = "favorites";

pub struct FavoritesStore<S> {
    storage: S,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the whole list. A missing key is an empty list; content that
    /// does not parse is reported as [`CastlistError::CorruptFavorites`].
    pub fn load(&self) -> Result<Vec<FavoriteEntry>, CastlistError> {
        match self.storage.get(FAVORITES_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() || raw.trim() == "null" => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| CastlistError::CorruptFavorites(e.to_string())),
        }
    }

    /// Like [`load`](Self::load), but treats corrupt data as empty.
    pub fn load_or_empty(&self) -> Vec<FavoriteEntry> {
        self.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not read favorites, showing none");
            Vec::new()
        })
    }

    /// Replace the entry with the same key, or append it.
    pub fn upsert(&self, entry: FavoriteEntry) -> Result<(), CastlistError> {
        let mut entries = self.load()?;
        match entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => {
                info!(key = %entry.key, title = %entry.title, "updated favorite");
                *existing = entry;
            }
            None => {
                info!(key = %entry.key, title = %entry.title, "added favorite");
                entries.push(entry);
            }
        }
        self.save(&entries)
    }

    /// Delete the entry with `key`. Returns whether anything was removed.
    pub fn remove(&self, key: &str) -> Result<bool, CastlistError> {
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| e.key != key);
        if entries.len() == before {
            return Ok(false);
        }
        self.save(&entries)?;
        info!(key, "removed favorite");
        Ok(true)
    }

    /// Whether an entry with `key` exists.
    pub fn contains(&self, key: &str) -> Result<bool, CastlistError> {
        Ok(self.load()?.iter().any(|e| e.key == key))
    }

    /// Drop every favorite, including unreadable data.
    pub fn clear(&self) -> Result<(), CastlistError> {
        self.storage.delete(FAVORITES_KEY)?;
        info!("cleared favorites");
        Ok(())
    }

    fn save(&self, entries: &[FavoriteEntry]) -> Result<(), CastlistError> {
        let json = serde_json::to_string(entries)?;
        self.storage.set(FAVORITES_KEY, &json)
    }
}
