//! The catalog's fixed genre table.
//!
//! Shows carry genres as indices into this table. Index 0 is the "All"
//! sentinel used by the genre filter and never appears on a show.

pub const ALL: &str = "All";

pub const GENRES: &[&str] = &[
    ALL,
    "Personal Growth",
    "True Crime and Investigative Journalism",
    "History",
    "Comedy",
    "Entertainment",
    "Business",
    "Fiction",
    "News",
    "Kids and Family",
];

/// Table index of a genre name, compared case-insensitively.
pub fn index_of(name: &str) -> Option<u32> {
    let name = name.trim();
    GENRES
        .iter()
        .position(|g| g.eq_ignore_ascii_case(name))
        .and_then(|i| u32::try_from(i).ok())
}

pub fn name_of(index: u32) -> Option<&'static str> {
    GENRES.get(index as usize).copied()
}

/// Whether a filter value means "no genre filter".
pub fn is_all(name: &str) -> bool {
    let name = name.trim();
    name.is_empty() || name.eq_ignore_ascii_case(ALL)
}

/// Display names for a show's genre indices. Unknown indices and the
/// "All" sentinel are skipped.
pub fn genre_names(indices: &[u32]) -> Vec<&'static str> {
    indices
        .iter()
        .filter(|&&i| i != 0)
        .filter_map(|&i| name_of(i))
        .collect()
}
