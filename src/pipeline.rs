//! Search, filter, sort and partition of the catalog.
//!
//! Everything here is a pure function of the catalog, the favorite set and
//! the [`ViewParams`]; the dashboard recomputes it on every draw.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, System};
use crate::favorites::FavoriteSet;

/// Field the visible list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    Category,
    LastAccessed,
    Usage,
    Status,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        Self::Name,
        Self::Category,
        Self::LastAccessed,
        Self::Usage,
        Self::Status,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Category => "Category",
            Self::LastAccessed => "Last Accessed",
            Self::Usage => "Usage",
            Self::Status => "Status",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Comparator for this key. Dates and usage sort newest/highest first;
    /// a missing date sorts as the earliest possible one.
    pub fn compare(self, a: &System, b: &System) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Category => a.category.as_str().cmp(b.category.as_str()),
            Self::LastAccessed => b.last_accessed.cmp(&a.last_accessed),
            Self::Usage => b.usage.cmp(&a.usage),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

/// Active category, or the "all" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(c) => c.as_str(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("all") {
            Some(Self::All)
        } else {
            Category::parse(s).map(Self::Only)
        }
    }
}

/// User-adjustable inputs that drive the visible list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
    pub tags: BTreeSet<String>,
}

pub fn matches_search(system: &System, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    system.name.to_lowercase().contains(&term)
        || system.description.to_lowercase().contains(&term)
        || system.category.as_str().contains(&term)
        || system.tags.iter().any(|t| t.to_lowercase().contains(&term))
}

pub fn matches_category(system: &System, category: CategoryFilter) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::Only(c) => system.category == c,
    }
}

pub fn matches_tags(system: &System, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || system.tags.iter().any(|t| selected.contains(t))
}

/// Records passing every predicate, ordered by `params.sort`.
pub fn filter_and_sort<'a>(systems: &'a [System], params: &ViewParams) -> Vec<&'a System> {
    let mut out: Vec<&System> = systems
        .iter()
        .filter(|s| matches_search(s, &params.search))
        .filter(|s| matches_category(s, params.category))
        .filter(|s| matches_tags(s, &params.tags))
        .collect();
    // sort_by is stable
    out.sort_by(|a, b| params.sort.compare(a, b));
    out
}

/// Display group a record lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Favorites,
    Recommended,
    Other,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Self::Favorites => "Your Favorites",
            Self::Recommended => "Recommended for You",
            Self::Other => "All Systems",
        }
    }
}

/// The three disjoint groups of the filtered list, each in sorted order.
#[derive(Debug, Clone, Default)]
pub struct Partitions<'a> {
    pub favorites: Vec<&'a System>,
    pub recommended: Vec<&'a System>,
    pub other: Vec<&'a System>,
}

impl<'a> Partitions<'a> {
    pub fn len(&self) -> usize {
        self.favorites.len() + self.recommended.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattened display order: favorites, then recommended, then the rest.
    pub fn rows(&self) -> Vec<(Section, &'a System)> {
        let favorites = self.favorites.iter().map(|s| (Section::Favorites, *s));
        let recommended = self.recommended.iter().map(|s| (Section::Recommended, *s));
        let other = self.other.iter().map(|s| (Section::Other, *s));
        favorites.chain(recommended).chain(other).collect()
    }

    pub fn section(&self, section: Section) -> &[&'a System] {
        match section {
            Section::Favorites => &self.favorites,
            Section::Recommended => &self.recommended,
            Section::Other => &self.other,
        }
    }
}

pub fn partition<'a>(filtered: &[&'a System], favorites: &FavoriteSet) -> Partitions<'a> {
    let mut parts = Partitions::default();
    for &system in filtered {
        if favorites.contains(system.id) {
            parts.favorites.push(system);
        } else if system.is_recommended {
            parts.recommended.push(system);
        } else {
            parts.other.push(system);
        }
    }
    parts
}

/// Full derivation: filter, sort, then split by favorites.
pub fn derive<'a>(
    systems: &'a [System],
    params: &ViewParams,
    favorites: &FavoriteSet,
) -> Partitions<'a> {
    partition(&filter_and_sort(systems, params), favorites)
}

/// Text shown in place of the list when nothing survives the filters.
pub fn empty_state_message(params: &ViewParams) -> String {
    if params.search.is_empty() {
        "No systems match the current filters".to_string()
    } else {
        format!("No systems match \"{}\"", params.search)
    }
}
