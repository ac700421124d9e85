//! Derived views over the local prompt list.
//!
//! Every function here is pure: it takes the current list and filter state
//! and returns a fresh projection. Callers recompute after each change.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use prompt_curator_core::Prompt;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// `created_at` descending.
    #[default]
    Newest,
    Oldest,
    /// Text order ignoring accents and case; lower case first on ties.
    Alphabetical,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Alphabetical => "alphabetical",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "alphabetical" => Ok(Self::Alphabetical),
            other => Err(format!("unknown sort order '{other}' (newest, oldest, alphabetical)")),
        }
    }
}

/// Tag filter. `All` is the sentinel that disables filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

impl FromStr for TagFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("empty tag filter".to_owned()),
            "all" => Ok(Self::All),
            tag => Ok(Self::Tag(tag.to_owned())),
        }
    }
}

/// Filter and sort state owned by the list controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub search: String,
    pub tag: TagFilter,
    pub sort: SortOrder,
}

/// Case-insensitive substring match on text, description or any tag.
///
/// A blank query matches everything. Otherwise the query is matched as
/// typed, surrounding spaces included.
#[must_use]
pub fn matches_search(prompt: &Prompt, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    prompt.text.to_lowercase().contains(&needle)
        || prompt.description.as_deref().is_some_and(|d| d.to_lowercase().contains(&needle))
        || prompt.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

#[must_use]
pub fn matches_tag(prompt: &Prompt, filter: &TagFilter) -> bool {
    match filter {
        TagFilter::All => true,
        TagFilter::Tag(tag) => prompt.has_tag(tag),
    }
}

/// Sort key for [`SortOrder::Alphabetical`]: base letters, then accents,
/// then case with lower case first, then the raw text.
fn alphabetical_key(text: &str) -> (String, String, Vec<bool>, String) {
    let base = text.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect();
    let accented = text.nfd().flat_map(char::to_lowercase).collect();
    let upper = text.chars().map(char::is_uppercase).collect();
    (base, accented, upper, text.to_owned())
}

/// Stable sort in place; ties keep their relative order.
pub fn sort_prompts(prompts: &mut [Prompt], order: SortOrder) {
    match order {
        SortOrder::Newest => prompts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => prompts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Alphabetical => prompts.sort_by_cached_key(|p| alphabetical_key(&p.text)),
    }
}

/// Search, then tag filter, then sort on a copy. The input is untouched.
#[must_use]
pub fn derive_view(prompts: &[Prompt], filter: &ViewFilter) -> Vec<Prompt> {
    let mut view: Vec<Prompt> = prompts
        .iter()
        .filter(|p| matches_search(p, &filter.search))
        .filter(|p| matches_tag(p, &filter.tag))
        .cloned()
        .collect();
    sort_prompts(&mut view, filter.sort);
    view
}

/// Distinct tags across the whole list with the number of prompts carrying
/// each, sorted by tag.
#[must_use]
pub fn tag_counts(prompts: &[Prompt]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for prompt in prompts {
        let mut seen: Vec<&str> = Vec::with_capacity(prompt.tags.len());
        for tag in &prompt.tags {
            if !seen.contains(&tag.as_str()) {
                seen.push(tag);
                *counts.entry(tag).or_default() += 1;
            }
        }
    }
    counts.into_iter().map(|(tag, n)| (tag.to_owned(), n)).collect()
}
