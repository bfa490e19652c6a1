use crate::models::{Entry, EntryId};

/// True when any value of the entry (identity included), as text, contains
/// `query` case-insensitively. Empty text never contributes a match by itself.
pub(crate) fn entry_matches(entry: &Entry, query_lower: &str) -> bool {
    if query_lower.is_empty() {
        return true;
    }

    if entry.id.to_string().to_lowercase().contains(query_lower) {
        return true;
    }

    let f = &entry.fields;
    [
        f.name.as_str(),
        f.surname.as_str(),
        f.age.as_str(),
        f.description.as_str(),
        f.total.as_str(),
        f.workplace.as_str(),
    ]
    .into_iter()
    .filter(|v| !v.is_empty())
    .any(|v| v.to_lowercase().contains(query_lower))
}

/// Client-side search over the cached list. Order is preserved.
pub(crate) fn filter_entries(entries: &[Entry], query: &str) -> Vec<Entry> {
    let q = query.to_lowercase();
    entries
        .iter()
        .filter(|e| entry_matches(e, &q))
        .cloned()
        .collect()
}

/// Drops the entry hidden by the cross-view deletion signal, if any.
pub(crate) fn exclude_deleted(entries: Vec<Entry>, deleted: Option<&EntryId>) -> Vec<Entry> {
    match deleted {
        Some(id) => entries.into_iter().filter(|e| &e.id != id).collect(),
        None => entries,
    }
}

/// What a view renders: `None` while the cache is absent, otherwise the
/// filtered list minus the hidden id.
pub(crate) fn visible_entries(
    cache: Option<&[Entry]>,
    query: &str,
    hidden: Option<&EntryId>,
) -> Option<Vec<Entry>> {
    cache.map(|entries| exclude_deleted(filter_entries(entries, query), hidden))
}
