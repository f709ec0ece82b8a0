//! Catalog filter, fuzzy search and sort.
//!
//! Pure functions over an in-memory show list. The three steps run in a
//! fixed order (genre filter, title search, sort) and never fail:
//! records with missing or malformed fields drop out of the result.

use std::cmp::Ordering;
use std::str::FromStr;

use castlist_api::catalog::types::parse_timestamp;
use castlist_api::catalog::{Show, ShowPreview};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use thiserror::Error;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::genre;

/// Fields the pipeline reads from a catalog record.
pub trait Listing {
    fn title(&self) -> &str;
    fn updated(&self) -> &str;
    fn genres(&self) -> &[u32];

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.updated())
    }
}

impl Listing for ShowPreview {
    fn title(&self) -> &str {
        &self.title
    }
    fn updated(&self) -> &str {
        &self.updated
    }
    fn genres(&self) -> &[u32] {
        &self.genres
    }
}

impl Listing for Show {
    fn title(&self) -> &str {
        &self.title
    }
    fn updated(&self) -> &str {
        &self.updated
    }
    fn genres(&self) -> &[u32] {
        &self.genres
    }
}

/// Catalog sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShowSort {
    /// Keep the order produced by filtering and search.
    #[default]
    None,
    TitleAsc,
    TitleDesc,
    /// Oldest update first.
    UpdatedAsc,
    /// Most recent update first.
    UpdatedDesc,
}

#[derive(Debug, Clone, Error)]
#[error("unknown sort order: {0:?}")]
pub struct UnknownSort(pub String);

impl ShowSort {
    pub const ALL: &[ShowSort] = &[
        Self::None,
        Self::TitleAsc,
        Self::TitleDesc,
        Self::UpdatedAsc,
        Self::UpdatedDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::UpdatedAsc => "updated-asc",
            Self::UpdatedDesc => "updated-desc",
        }
    }
}

impl FromStr for ShowSort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "a-z" | "az" | "title-asc" => Ok(Self::TitleAsc),
            "z-a" | "za" | "title-desc" => Ok(Self::TitleDesc),
            "ascending" | "oldest" | "updated-asc" => Ok(Self::UpdatedAsc),
            "descending" | "newest" | "updated-desc" => Ok(Self::UpdatedDesc),
            _ => Err(UnknownSort(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShowSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run the full pipeline: genre filter, then fuzzy search, then sort.
pub fn run<T: Listing + Clone>(shows: &[T], genre: &str, query: &str, sort: ShowSort) -> Vec<T> {
    let filtered = filter_by_genre(shows, genre);
    let searched = search(filtered, query);
    sort_shows(searched, sort)
}

/// Keep shows tagged with `genre`. "All" (or empty) keeps everything; an
/// unknown genre name keeps nothing.
pub fn filter_by_genre<T: Listing + Clone>(shows: &[T], genre: &str) -> Vec<T> {
    if genre::is_all(genre) {
        return shows.to_vec();
    }
    let Some(index) = genre::index_of(genre) else {
        return Vec::new();
    };
    shows
        .iter()
        .filter(|s| s.genres().contains(&index))
        .cloned()
        .collect()
}

/// Similarity a query word needs against some title word to count as a
/// typo match.
const TYPO_THRESHOLD: f64 = 0.75;

/// Fuzzy title search, best match first. Equal scores keep input order.
///
/// Titles and query compare accent- and case-insensitively. Subsequence
/// hits rank ahead of typo-tolerant hits.
pub fn search<T: Listing>(shows: Vec<T>, query: &str) -> Vec<T> {
    let query = collation_key(query.trim());
    if query.is_empty() {
        return shows;
    }

    let matcher = TitleMatcher::new();
    let mut ranked: Vec<(Rank, T)> = shows
        .into_iter()
        .filter_map(|s| matcher.rank(s.title(), &query).map(|rank| (rank, s)))
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0));
    ranked.into_iter().map(|(_, s)| s).collect()
}

/// Whether `title` matches `query` under the search rules.
pub fn matches(title: &str, query: &str) -> bool {
    let query = collation_key(query.trim());
    query.is_empty() || TitleMatcher::new().rank(title, &query).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rank {
    typo: bool,
    score: i64,
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.typo
            .cmp(&other.typo)
            .then_with(|| other.score.cmp(&self.score))
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct TitleMatcher {
    skim: SkimMatcherV2,
}

impl TitleMatcher {
    fn new() -> Self {
        Self {
            skim: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// Rank `title` against an already-normalized query.
    fn rank(&self, title: &str, query: &str) -> Option<Rank> {
        let title = collation_key(title);
        if let Some(score) = self.skim.fuzzy_match(&title, query) {
            return Some(Rank { typo: false, score });
        }
        typo_similarity(&title, query).map(|sim| Rank {
            typo: true,
            score: (sim * 1000.0) as i64,
        })
    }
}

/// Mean best-word similarity when every query word is close to some
/// title word (or to a title word's prefix of the same length).
fn typo_similarity(title: &str, query: &str) -> Option<f64> {
    let title_words: Vec<&str> = words(title).collect();
    let mut total = 0.0;
    let mut count = 0;
    for word in words(query) {
        let len = word.chars().count();
        let best = title_words
            .iter()
            .map(|t| {
                let prefix: String = t.chars().take(len).collect();
                strsim::normalized_damerau_levenshtein(word, t)
                    .max(strsim::normalized_damerau_levenshtein(word, &prefix))
            })
            .fold(0.0, f64::max);
        if best < TYPO_THRESHOLD {
            return None;
        }
        total += best;
        count += 1;
    }
    (count > 0).then(|| total / count as f64)
}

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty())
}

/// Stable sort by `order`. Date sorts drop records whose `updated`
/// timestamp does not parse.
pub fn sort_shows<T: Listing>(shows: Vec<T>, order: ShowSort) -> Vec<T> {
    match order {
        ShowSort::None => shows,
        ShowSort::TitleAsc | ShowSort::TitleDesc => {
            let mut keyed: Vec<(String, T)> = shows
                .into_iter()
                .map(|s| (collation_key(s.title()), s))
                .collect();
            keyed.sort_by(|a, b| {
                let ord = compare_titles(&a.0, a.1.title(), &b.0, b.1.title());
                if order == ShowSort::TitleDesc {
                    ord.reverse()
                } else {
                    ord
                }
            });
            keyed.into_iter().map(|(_, s)| s).collect()
        }
        ShowSort::UpdatedAsc | ShowSort::UpdatedDesc => {
            let mut dated: Vec<(DateTime<Utc>, T)> = shows
                .into_iter()
                .filter_map(|s| s.updated_at().map(|at| (at, s)))
                .collect();
            if order == ShowSort::UpdatedAsc {
                dated.sort_by(|a, b| a.0.cmp(&b.0));
            } else {
                dated.sort_by(|a, b| b.0.cmp(&a.0));
            }
            dated.into_iter().map(|(_, s)| s).collect()
        }
    }
}

/// Shows for the "recommended" carousel: the first `count` by title, Z to A.
pub fn recommended<T: Listing + Clone>(shows: &[T], count: usize) -> Vec<T> {
    let mut sorted = sort_shows(shows.to_vec(), ShowSort::TitleDesc);
    sorted.truncate(count);
    sorted
}

/// Accent- and case-insensitive key approximating locale collation.
pub fn collation_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

fn compare_titles(key_a: &str, raw_a: &str, key_b: &str, raw_b: &str) -> Ordering {
    key_a.cmp(key_b).then_with(|| raw_a.cmp(raw_b))
}

/// `MM/DD/YYYY` display form of a catalog timestamp, or the raw string.
pub fn format_updated(updated: &str) -> String {
    parse_timestamp(updated)
        .map(|dt| dt.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|| updated.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(id: &str, title: &str, updated: &str, genres: &[u32]) -> ShowPreview {
        ShowPreview {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            image: String::new(),
            updated: updated.into(),
            genres: genres.to_vec(),
            seasons: 1,
        }
    }

    fn catalog() -> Vec<ShowPreview> {
        vec![
            show("1", "Something Was Wrong", "2022-11-03T07:00:00.000Z", &[2]),
            show("2", "History Daily", "2021-04-01T00:00:00.000Z", &[3, 8]),
            show("3", "Comedy Bang Bang", "2023-01-10T00:00:00.000Z", &[4, 5]),
            show("4", "Ébène Stories", "2020-06-15T00:00:00.000Z", &[7]),
            show("5", "Untagged", "not a date", &[]),
        ]
    }

    fn ids(shows: &[ShowPreview]) -> Vec<&str> {
        shows.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_all_genre_keeps_everything() {
        let shows = catalog();
        assert_eq!(filter_by_genre(&shows, "All"), shows);
    }

    #[test]
    fn test_genre_filter() {
        let shows = catalog();
        assert_eq!(ids(&filter_by_genre(&shows, "History")), vec!["2"]);
        assert_eq!(ids(&filter_by_genre(&shows, "entertainment")), vec!["3"]);
        assert!(filter_by_genre(&shows, "Polka").is_empty());
    }

    #[test]
    fn test_genre_filter_is_idempotent() {
        let shows = catalog();
        for name in genre::GENRES {
            let once = filter_by_genre(&shows, name);
            let twice = filter_by_genre(&once, name);
            assert_eq!(once, twice, "genre {name}");
        }
    }

    #[test]
    fn test_empty_query_passes_through() {
        let shows = catalog();
        let filtered = filter_by_genre(&shows, "All");
        assert_eq!(run(&shows, "All", "", ShowSort::None), filtered);
        assert_eq!(run(&shows, "All", "   ", ShowSort::None), filtered);
    }

    #[test]
    fn test_search_results_all_match() {
        let shows = catalog();
        for query in ["hist", "bang", "swr", "sto"] {
            let results = run(&shows, "All", query, ShowSort::None);
            assert!(!results.is_empty(), "query {query}");
            for s in &results {
                assert!(matches(&s.title, query), "{} vs {query}", s.title);
            }
        }
    }

    #[test]
    fn test_search_ranks_best_first() {
        let shows = vec![
            show("a", "Whimsical Thoughts", "", &[]),
            show("b", "History", "", &[]),
        ];
        let results = search(shows, "hist");
        assert_eq!(results[0].id, "b");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_tolerates_typos_and_accents() {
        assert_eq!(ids(&run(&catalog(), "All", "histroy", ShowSort::None)), vec!["2"]);
        assert_eq!(ids(&run(&catalog(), "All", "ebene", ShowSort::None)), vec!["4"]);
        assert_eq!(ids(&run(&catalog(), "All", "HISTROY dialy", ShowSort::None)), vec!["2"]);
        assert!(matches("History Daily", "histroy"));
        assert!(matches("Ébène Stories", "ebene"));
        assert!(!matches("History Daily", "comedy"));
    }

    #[test]
    fn test_typo_hits_rank_after_subsequence_hits() {
        let shows = vec![
            show("a", "Hsitory Hour", "", &[]),
            show("b", "History Daily", "", &[]),
        ];
        assert_eq!(ids(&search(shows, "history")), vec!["b", "a"]);
    }

    #[test]
    fn test_search_excludes_non_matches() {
        let results = run(&catalog(), "All", "zzzz", ShowSort::None);
        assert!(results.is_empty());
    }

    #[test]
    fn test_filter_then_search() {
        let results = run(&catalog(), "History", "bang", ShowSort::None);
        assert!(results.is_empty());
    }

    #[test]
    fn test_title_sort_is_accent_insensitive() {
        let sorted = run(&catalog(), "All", "", ShowSort::TitleAsc);
        assert_eq!(ids(&sorted), vec!["3", "4", "2", "1", "5"]);

        let desc = run(&catalog(), "All", "", ShowSort::TitleDesc);
        assert_eq!(ids(&desc), vec!["5", "1", "2", "4", "3"]);
    }

    #[test]
    fn test_updated_sort_drops_malformed_dates() {
        let asc = run(&catalog(), "All", "", ShowSort::UpdatedAsc);
        assert_eq!(ids(&asc), vec!["4", "2", "1", "3"]);

        let desc = run(&catalog(), "All", "", ShowSort::UpdatedDesc);
        assert_eq!(ids(&desc), vec!["3", "1", "2", "4"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let shows = vec![
            show("x", "Same", "2023-01-01", &[1]),
            show("y", "Other", "2023-01-01", &[1]),
            show("z", "Same", "2023-01-01", &[1]),
        ];
        assert_eq!(ids(&sort_shows(shows.clone(), ShowSort::UpdatedAsc)), vec!["x", "y", "z"]);
        assert_eq!(ids(&sort_shows(shows.clone(), ShowSort::UpdatedDesc)), vec!["x", "y", "z"]);
        assert_eq!(ids(&sort_shows(shows.clone(), ShowSort::TitleAsc)), vec!["y", "x", "z"]);
        assert_eq!(ids(&sort_shows(shows, ShowSort::TitleDesc)), vec!["x", "z", "y"]);
    }

    #[test]
    fn test_recommended() {
        let picks = recommended(&catalog(), 2);
        assert_eq!(ids(&picks), vec!["5", "1"]);
        assert_eq!(recommended(&catalog(), 50).len(), 5);
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("A-Z".parse::<ShowSort>().unwrap(), ShowSort::TitleAsc);
        assert_eq!("Descending".parse::<ShowSort>().unwrap(), ShowSort::UpdatedDesc);
        assert_eq!("".parse::<ShowSort>().unwrap(), ShowSort::None);
        for order in ShowSort::ALL {
            assert_eq!(order.as_str().parse::<ShowSort>().unwrap(), *order);
        }
        assert!("sideways".parse::<ShowSort>().is_err());
    }

    #[test]
    fn test_format_updated() {
        assert_eq!(format_updated("2022-11-03T07:00:00.000Z"), "11/03/2022");
        assert_eq!(format_updated("soon"), "soon");
    }
}
