//! Listing engine
//!
//! Turns a fetched collection plus user-controlled parameters into the
//! visible page. Stages run in a fixed order:
//! - category and level inclusion (OR within each selection; level only
//!   constrains kinds that carry one)
//! - case-insensitive substring search over searchable fields
//! - sort
//! - offset and limit
//!
//! Every stage is pure. The input slice is never reordered; the page
//! borrows from it.

mod items;

use crate::errors::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Selection labels that mean "no filter"
const ALL_LABELS: &[&str] = &["semua", "all"];

/// An entity the listing engine can filter, search and sort
pub trait Listable {
    fn title(&self) -> &str;

    /// Secondary title, ranked between title and body hits
    fn alt_title(&self) -> Option<&str> {
        None
    }

    /// Searchable fields other than the titles
    fn body_fields(&self) -> Vec<&str>;

    /// Labels matched against a category selection
    fn category_labels(&self) -> Vec<&str>;

    /// Whether the kind is graded by level at all. Kinds without one
    /// pass through a level selection untouched.
    fn has_level(&self) -> bool {
        false
    }

    /// Difficulty level of this item
    fn level(&self) -> Option<&str> {
        None
    }
}

// ============================================================================
// Sort keys
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Fetch order ("Terbaru")
    #[default]
    Latest,
    /// Case-insensitive title ("A-Z")
    Alphabetical,
    /// Title hits, then alt-title hits, then body hits ("Paling Relevan")
    Relevance,
}

impl SortKey {
    /// Parse a sort label as shown in the UI or used in query strings.
    ///
    /// "Populer" is recognised but rejected: there is no popularity
    /// signal to sort by.
    pub fn parse(label: &str) -> Result<Self> {
        let normalized = label.trim().to_lowercase().replace([' ', '_'], "-");

        match normalized.as_str() {
            "" | "terbaru" | "latest" | "newest" => Ok(SortKey::Latest),
            "a-z" | "az" | "alphabetical" => Ok(SortKey::Alphabetical),
            "paling-relevan" | "relevan" | "relevance" => Ok(SortKey::Relevance),
            "populer" | "popular" => Err(AppError::UnsupportedSort {
                label: label.trim().to_string(),
            }),
            _ => Err(AppError::Validation {
                message: format!("Unknown sort key: {}", label.trim()),
                field: Some("sort".to_string()),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Latest => "latest",
            SortKey::Alphabetical => "alphabetical",
            SortKey::Relevance => "relevance",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Parameters
// ============================================================================

/// User-controlled listing parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingParams {
    query: String,
    categories: BTreeSet<String>,
    levels: BTreeSet<String>,
    sort: SortKey,
    offset: usize,
    limit: Option<usize>,
}

impl ListingParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text query; surrounding whitespace is ignored
    pub fn search(mut self, query: impl AsRef<str>) -> Self {
        self.query = query.as_ref().trim().to_string();
        self
    }

    /// Add a category to the selection; "Semua"/"all" are no-ops
    pub fn category(mut self, label: impl AsRef<str>) -> Self {
        insert_label(&mut self.categories, label.as_ref());
        self
    }

    pub fn categories<I, S>(self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels.into_iter().fold(self, |params, label| params.category(label))
    }

    pub fn level(mut self, label: impl AsRef<str>) -> Self {
        insert_label(&mut self.levels, label.as_ref());
        self
    }

    pub fn levels<I, S>(self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels.into_iter().fold(self, |params, label| params.level(label))
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    /// True when any inclusion or search filter is active
    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty() || !self.categories.is_empty() || !self.levels.is_empty()
    }
}

fn insert_label(set: &mut BTreeSet<String>, label: &str) {
    let label = label.trim().to_lowercase();
    if !label.is_empty() && !ALL_LABELS.contains(&label.as_str()) {
        set.insert(label);
    }
}

// ============================================================================
// Output
// ============================================================================

/// Why a listing rendered nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The collection itself is empty
    NoContent,
    /// Filters narrowed a non-empty collection to zero; offer a reset
    NoMatches,
}

/// One rendered listing page, borrowing items from the source collection
#[derive(Debug, Clone, Serialize)]
pub struct ListingPage<'a, T> {
    pub items: Vec<&'a T>,
    /// Items before any filtering
    pub total: usize,
    /// Items after filtering, before offset/limit
    pub matched: usize,
    pub is_empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
    pub sort: SortKey,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Run the listing pipeline over `items`
pub fn apply<'a, T: Listable>(items: &'a [T], params: &ListingParams) -> ListingPage<'a, T> {
    let needle = params.query.to_lowercase();

    let mut matched: Vec<&'a T> = items
        .iter()
        .filter(|item| matches_categories(*item, &params.categories))
        .filter(|item| matches_levels(*item, &params.levels))
        .filter(|item| matches_search(*item, &needle))
        .collect();

    sort_items(&mut matched, params.sort, &needle);

    let total = items.len();
    let matched_count = matched.len();
    let page: Vec<&'a T> = matched
        .into_iter()
        .skip(params.offset)
        .take(params.limit.unwrap_or(usize::MAX))
        .collect();

    let empty_state = match (matched_count, total) {
        (0, 0) => Some(EmptyState::NoContent),
        (0, _) => Some(EmptyState::NoMatches),
        _ => None,
    };

    ListingPage {
        items: page,
        total,
        matched: matched_count,
        is_empty: matched_count == 0,
        empty_state,
        sort: params.sort,
    }
}

fn matches_categories<T: Listable>(item: &T, selected: &BTreeSet<String>) -> bool {
    selected.is_empty()
        || item
            .category_labels()
            .iter()
            .any(|label| selected.contains(&label.to_lowercase()))
}

fn matches_levels<T: Listable>(item: &T, selected: &BTreeSet<String>) -> bool {
    selected.is_empty()
        || !item.has_level()
        || item
            .level()
            .is_some_and(|level| selected.contains(&level.to_lowercase()))
}

fn matches_search<T: Listable>(item: &T, needle: &str) -> bool {
    needle.is_empty() || hit_rank(item, needle).is_some()
}

/// 0 for a title hit, 1 for an alt-title hit, 2 for a body hit
fn hit_rank<T: Listable>(item: &T, needle: &str) -> Option<u8> {
    let contains = |field: &str| field.to_lowercase().contains(needle);

    if contains(item.title()) {
        Some(0)
    } else if item.alt_title().is_some_and(contains) {
        Some(1)
    } else if item.body_fields().into_iter().any(contains) {
        Some(2)
    } else {
        None
    }
}

fn sort_items<T: Listable>(items: &mut [&T], sort: SortKey, needle: &str) {
    match sort {
        SortKey::Latest => {}
        SortKey::Alphabetical => items.sort_by_cached_key(|item| item.title().to_lowercase()),
        SortKey::Relevance if needle.is_empty() => {}
        SortKey::Relevance => {
            items.sort_by_cached_key(|item| hit_rank(*item, needle).unwrap_or(u8::MAX))
        }
    }
}
