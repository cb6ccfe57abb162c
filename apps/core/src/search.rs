use std::cmp::Ordering;

use crate::config::Config;
use crate::index_store::Catalog;
use crate::model::{normalize_for_search, ClipboardItem, SearchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub total: usize,
    pub apps: usize,
    pub files: usize,
    pub clipboard: usize,
    pub clipboard_title_chars: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SearchLimits {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            total: cfg.max_results,
            apps: cfg.max_app_results,
            files: cfg.max_file_results,
            clipboard: cfg.max_clipboard_results,
            clipboard_title_chars: cfg.clipboard_title_chars,
        }
    }
}

/// Searches apps, then files, then clipboard history. Each source is ranked
/// and capped on its own; sources are concatenated in that order and the
/// total cap trims from the tail.
pub fn search(
    catalog: &Catalog,
    query: &str,
    clipboard: &[ClipboardItem],
    limits: &SearchLimits,
) -> Vec<SearchResult> {
    let normalized_query = normalize_for_search(query);
    if normalized_query.is_empty() || limits.total == 0 {
        return Vec::new();
    }

    let mut results = Vec::with_capacity(limits.total);
    results.extend(
        ranked_matches(catalog.apps(), &normalized_query, limits.apps, |app| {
            (&app.name, true)
        })
        .map(SearchResult::from_app),
    );
    results.extend(
        ranked_matches(catalog.files(), &normalized_query, limits.files, |file| {
            (&file.name, false)
        })
        .map(SearchResult::from_file),
    );
    results.extend(
        clipboard
            .iter()
            .filter(|item| item.content.to_lowercase().contains(&normalized_query))
            .take(limits.clipboard)
            .map(|item| SearchResult::from_clipboard(item, limits.clipboard_title_chars)),
    );

    results.truncate(limits.total);
    results
}

/// `key` yields the display name and whether word-prefix matching applies.
fn ranked_matches<'a, T>(
    entries: &'a [T],
    query: &str,
    limit: usize,
    key: impl Fn(&'a T) -> (&'a String, bool),
) -> impl Iterator<Item = &'a T> {
    let mut scored: Vec<(bool, String, &'a String, &'a T)> = entries
        .iter()
        .filter_map(|entry| {
            let (name, word_prefix) = key(entry);
            let lowered = name.to_lowercase();
            if !name_matches(&lowered, query, word_prefix) {
                return None;
            }
            let prefix = lowered.starts_with(query);
            Some((prefix, lowered, name, entry))
        })
        .collect();

    // Stable sort: full catalog order is the last tie-break.
    scored.sort_by(|a, b| compare_ranked(a.0, &a.1, a.2, b.0, &b.1, b.2));
    scored.into_iter().take(limit).map(|(_, _, _, entry)| entry)
}

fn compare_ranked(
    a_prefix: bool,
    a_lowered: &str,
    a_name: &str,
    b_prefix: bool,
    b_lowered: &str,
    b_name: &str,
) -> Ordering {
    b_prefix
        .cmp(&a_prefix)
        .then_with(|| a_lowered.cmp(b_lowered))
        .then_with(|| a_name.cmp(b_name))
}

fn name_matches(lowered_name: &str, query: &str, word_prefix: bool) -> bool {
    if lowered_name.contains(query) {
        return true;
    }
    word_prefix
        && lowered_name
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .any(|word| word.starts_with(query))
}
