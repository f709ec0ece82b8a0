use std::collections::BTreeMap;
use std::str::FromStr;

use crate::models::FavoriteEntry;
use crate::pipeline::UnknownSort;

/// Ordering of show groups in the favorites view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FavoriteSort {
    #[default]
    AZ,
    ZA,
    /// Most recently updated show first.
    RecentlyAdded,
    /// Least recently updated show first.
    LeastAdded,
}

impl FavoriteSort {
    pub const ALL: &[FavoriteSort] = &[Self::AZ, Self::ZA, Self::RecentlyAdded, Self::LeastAdded];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AZ => "az",
            Self::ZA => "za",
            Self::RecentlyAdded => "recently-added",
            Self::LeastAdded => "least-added",
        }
    }
}

impl FromStr for FavoriteSort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "az" | "a-z" => Ok(Self::AZ),
            "za" | "z-a" => Ok(Self::ZA),
            "recently-added" | "recentlyadded" | "recent" => Ok(Self::RecentlyAdded),
            "least-added" | "leastadded" | "least" => Ok(Self::LeastAdded),
            _ => Err(UnknownSort(s.to_string())),
        }
    }
}

impl std::fmt::Display for FavoriteSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partition entries by show name, keeping input order inside each group.
pub fn group_by_show(entries: &[FavoriteEntry]) -> BTreeMap<String, Vec<FavoriteEntry>> {
    let mut groups: BTreeMap<String, Vec<FavoriteEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(entry.show_name.clone())
            .or_default()
            .push(entry.clone());
    }
    groups
}

/// Order groups for display.
///
/// `AZ`/`ZA` compare show names; the date orders compare each group's
/// first entry's `showUpdatedDate`. Unparseable dates count as oldest.
pub fn sort_groups(
    groups: BTreeMap<String, Vec<FavoriteEntry>>,
    order: FavoriteSort,
) -> Vec<(String, Vec<FavoriteEntry>)> {
    let mut sorted: Vec<(String, Vec<FavoriteEntry>)> = groups.into_iter().collect();
    match order {
        FavoriteSort::AZ => sorted.sort_by(|a, b| a.0.cmp(&b.0)),
        FavoriteSort::ZA => sorted.sort_by(|a, b| b.0.cmp(&a.0)),
        FavoriteSort::RecentlyAdded => sorted.sort_by(|a, b| group_date(b).cmp(&group_date(a))),
        FavoriteSort::LeastAdded => sorted.sort_by(|a, b| group_date(a).cmp(&group_date(b))),
    }
    sorted
}

fn group_date(group: &(String, Vec<FavoriteEntry>)) -> Option<chrono::DateTime<chrono::Utc>> {
    group.1.first().and_then(FavoriteEntry::show_updated_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::tests::entry;

    #[test]
    fn test_group_single_show() {
        let a = entry("a", "X", "2023-01-01", 1);
        let b = entry("b", "X", "2023-01-01", 2);
        let groups = group_by_show(&[a.clone(), b.clone()]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups["X"], vec![a.clone(), b.clone()]);

        let sorted = sort_groups(groups, FavoriteSort::AZ);
        assert_eq!(sorted, vec![("X".to_string(), vec![a, b])]);
    }

    #[test]
    fn test_grouping_is_a_partition() {
        let entries = vec![
            entry("1", "Beta", "2022-05-01", 1),
            entry("2", "Alpha", "2021-01-01", 1),
            entry("3", "Beta", "2022-05-01", 2),
            entry("4", "Gamma", "2023-03-01", 1),
            entry("5", "Alpha", "2021-01-01", 7),
        ];
        let groups = group_by_show(&entries);

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, entries.len());
        for e in &entries {
            let holders = groups.values().filter(|g| g.contains(e)).count();
            assert_eq!(holders, 1, "entry {} in {holders} groups", e.key);
        }

        let alpha: Vec<&str> = groups["Alpha"].iter().map(|e| e.key.as_str()).collect();
        assert_eq!(alpha, vec!["2", "5"]);
    }

    #[test]
    fn test_sort_orders() {
        let entries = vec![
            entry("1", "Beta", "2022-05-01", 1),
            entry("2", "Alpha", "2021-01-01", 1),
            entry("3", "Gamma", "2023-03-01T12:00:00Z", 1),
            entry("4", "Delta", "whenever", 1),
        ];
        let names = |order| {
            sort_groups(group_by_show(&entries), order)
                .into_iter()
                .map(|(name, _)| name)
                .collect::<Vec<_>>()
        };

        assert_eq!(names(FavoriteSort::AZ), vec!["Alpha", "Beta", "Delta", "Gamma"]);
        assert_eq!(names(FavoriteSort::ZA), vec!["Gamma", "Delta", "Beta", "Alpha"]);
        assert_eq!(
            names(FavoriteSort::RecentlyAdded),
            vec!["Gamma", "Beta", "Alpha", "Delta"]
        );
        assert_eq!(
            names(FavoriteSort::LeastAdded),
            vec!["Delta", "Alpha", "Beta", "Gamma"]
        );
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("recentlyAdded".parse::<FavoriteSort>().unwrap(), FavoriteSort::RecentlyAdded);
        assert_eq!("least_added".parse::<FavoriteSort>().unwrap(), FavoriteSort::LeastAdded);
        for order in FavoriteSort::ALL {
            assert_eq!(order.as_str().parse::<FavoriteSort>().unwrap(), *order);
        }
        assert!("newest".parse::<FavoriteSort>().is_err());
    }
}
