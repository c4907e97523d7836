use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Commit, FilterSpec, SortKey, Stats, TypeCount};

/// Applies a filter spec to the full commit set and returns a new, ordered
/// subset. Pure: the input is never mutated, and re-applying the same spec
/// to its own output returns the same sequence.
pub fn apply(commits: &[Commit], spec: &FilterSpec) -> Vec<Commit> {
    let mut result: Vec<Commit> = commits.to_vec();

    if !spec.text.is_empty() {
        let needle = spec.text.to_lowercase();
        result.retain(|c| {
            c.subject.to_lowercase().contains(&needle)
                || c.author.to_lowercase().contains(&needle)
                || c.short_id.to_lowercase().starts_with(&needle)
        });
    }

    if let Some(author) = &spec.author {
        result.retain(|c| &c.author == author);
    }
    if let Some(commit_type) = &spec.commit_type {
        result.retain(|c| c.commit_type.as_ref() == Some(commit_type));
    }
    if let Some(scope) = &spec.scope {
        result.retain(|c| c.scope.as_ref() == Some(scope));
    }

    if let Some(start) = parse_date_bound(&spec.start_date) {
        result.retain(|c| c.date >= start);
    }
    // The upper bound compares the raw midnight timestamp and is deliberately
    // not extended to end-of-day.
    if let Some(end) = parse_date_bound(&spec.end_date) {
        result.retain(|c| c.date <= end);
    }

    // Vec::sort_by is stable, so equal keys keep their relative order.
    match spec.sort {
        SortKey::DateDesc => result.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::DateAsc => result.sort_by(|a, b| a.date.cmp(&b.date)),
        SortKey::AuthorAsc => result.sort_by(|a, b| a.author.cmp(&b.author)),
        SortKey::TypeAsc => result.sort_by(|a, b| {
            // Missing type compares as the empty string and sorts first.
            let ta = a.commit_type.as_deref().unwrap_or("");
            let tb = b.commit_type.as_deref().unwrap_or("");
            ta.cmp(tb)
        }),
    }

    result
}

/// Parses a `YYYY-MM-DD` (or full RFC 3339) filter bound into a UTC instant
/// at midnight. Empty or unparseable strings mean "no bound".
pub fn parse_date_bound(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Sorted set of non-empty values of one commit field, for pick-lists.
pub fn distinct_values<F>(commits: &[Commit], field: F) -> Vec<String>
where
    F: Fn(&Commit) -> Option<&str>,
{
    let set: BTreeSet<&str> = commits
        .iter()
        .filter_map(|c| field(c))
        .filter(|v| !v.trim().is_empty())
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// Summary statistics over the full set plus the currently filtered subset.
/// The type distribution always covers the unfiltered set.
pub fn summarize(all: &[Commit], filtered: &[Commit]) -> Stats {
    let authors: BTreeSet<&str> = all.iter().map(|c| c.author.as_str()).collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for commit in all {
        if let Some(commit_type) = &commit.commit_type {
            *counts.entry(commit_type.as_str()).or_insert(0) += 1;
        }
    }

    let mut distribution: Vec<TypeCount> = counts
        .into_iter()
        .map(|(commit_type, count)| TypeCount {
            commit_type: commit_type.to_string(),
            count,
        })
        .collect();
    // Count descending; equal counts ordered by type name for determinism.
    distribution.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.commit_type.cmp(&b.commit_type))
    });

    let max_count = distribution.iter().map(|d| d.count).max().unwrap_or(0).max(1);

    Stats {
        displayed: filtered.len(),
        total: all.len(),
        authors: authors.len(),
        types: distribution.len(),
        distribution,
        max_count,
    }
}
