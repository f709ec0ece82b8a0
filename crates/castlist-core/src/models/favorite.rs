use castlist_api::catalog::types::null_as_default;
use castlist_api::catalog::{Episode, Show};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A favorited episode, persisted as one element of the favorites array.
///
/// Field names are camelCase on disk. Extra fields written by older
/// clients are ignored; a missing or `null` field loads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub show_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub show_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub show_updated_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub episode_number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_added: String,
}

impl FavoriteEntry {
    /// Build an entry for `episode` of `show`'s season `season`.
    ///
    /// The key is derived from `(show id, season, episode number)`, so
    /// favoriting the same episode again replaces the earlier entry.
    pub fn from_episode(show: &Show, season: u32, episode: &Episode, now: DateTime<Local>) -> Self {
        Self {
            key: Self::natural_key(&show.id, season, episode.episode),
            show_id: show.id.clone(),
            show_name: show.title.clone(),
            show_updated_date: show.updated.clone(),
            season,
            episode_number: episode.episode,
            title: episode.title.clone(),
            description: episode.description.clone(),
            file: episode.file.clone(),
            time_added: now.to_rfc3339(),
        }
    }

    /// Stable UUID (v5) for a show/season/episode triple.
    pub fn natural_key(show_id: &str, season: u32, episode_number: u32) -> String {
        let name = format!("castlist:{show_id}:{season}:{episode_number}");
        Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
    }

    pub fn show_updated_at(&self) -> Option<DateTime<Utc>> {
        castlist_api::catalog::types::parse_timestamp(&self.show_updated_date)
    }

    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        castlist_api::catalog::types::parse_timestamp(&self.time_added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castlist_api::catalog::Season;

    fn show() -> Show {
        Show {
            id: "10716".into(),
            title: "Something Was Wrong".into(),
            description: String::new(),
            image: String::new(),
            updated: "2022-11-03T07:00:00.000Z".into(),
            genres: vec![2],
            seasons: vec![Season {
                season: 1,
                title: None,
                image: None,
                episodes: vec![Episode {
                    episode: 3,
                    title: "The Call".into(),
                    description: "desc".into(),
                    file: "https://example.com/3.mp3".into(),
                }],
            }],
        }
    }

    #[test]
    fn test_from_episode() {
        let show = show();
        let episode = show.episode(1, 3).unwrap();
        let entry = FavoriteEntry::from_episode(&show, 1, episode, Local::now());

        assert_eq!(entry.show_id, "10716");
        assert_eq!(entry.show_name, "Something Was Wrong");
        assert_eq!(entry.episode_number, 3);
        assert_eq!(entry.file, "https://example.com/3.mp3");
        assert!(entry.added_at().is_some());
        assert_eq!(entry.key, FavoriteEntry::natural_key("10716", 1, 3));
    }

    #[test]
    fn test_natural_key_is_stable_and_distinct() {
        let a = FavoriteEntry::natural_key("1", 1, 1);
        assert_eq!(a, FavoriteEntry::natural_key("1", 1, 1));
        assert_ne!(a, FavoriteEntry::natural_key("1", 1, 2));
        assert_ne!(a, FavoriteEntry::natural_key("1", 2, 1));
        assert_ne!(a, FavoriteEntry::natural_key("11", 1, 1));
    }

    #[test]
    fn test_reads_legacy_entry() {
        // Shape written by the browser client: no showId, extra fields, locale time.
        let json = r#"{
            "key": "0b5c9f3e-2a5c-4d4e-9a43-1d2f6b7c8e90",
            "season": 1,
            "episodeNumber": 2,
            "showName": "Something Was Wrong",
            "showUpdatedDate": "2022-11-03T07:00:00.000Z",
            "timeAdded": "11/3/2023, 10:15:00 AM",
            "isFavorite": true,
            "episode": 2,
            "title": "Ep 2",
            "description": "d",
            "file": "https://example.com/2.mp3"
        }"#;
        let entry: FavoriteEntry = serde_json::from_str(json).unwrap();
        assert!(entry.show_id.is_empty());
        assert_eq!(entry.episode_number, 2);
        assert!(entry.show_updated_at().is_some());
        assert!(entry.added_at().is_none());
    }

    #[test]
    fn test_null_fields_load_as_empty() {
        let json = r#"[{
            "key": "k1",
            "showName": "Something Was Wrong",
            "showId": null,
            "season": null,
            "episodeNumber": 4,
            "title": "Ep 4",
            "description": null,
            "file": null
        }]"#;
        let entries: Vec<FavoriteEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].show_id.is_empty());
        assert!(entries[0].description.is_empty());
        assert_eq!(entries[0].season, 0);
        assert_eq!(entries[0].episode_number, 4);
    }

    #[test]
    fn test_serializes_camel_case() {
        let entry = FavoriteEntry::from_episode(&show(), 1, &show().seasons[0].episodes[0], Local::now());
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("showUpdatedDate").is_some());
        assert!(value.get("episodeNumber").is_some());
        assert!(value.get("timeAdded").is_some());
    }
}
