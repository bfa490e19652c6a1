use crate::api::{ApiClient, ApiResult, EntryService};
use crate::filter::visible_entries;
use crate::models::{Entry, EntryId};
use crate::state::AppContext;
use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Last-known projection of the remote collection.
///
/// `data` is `None` until the first successful response; it is "not yet
/// available", never "empty".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CacheState {
    pub data: Option<Vec<Entry>>,
}

impl CacheState {
    /// Replaces the whole list on success. A failure keeps whatever was there
    /// (including nothing).
    pub fn apply(&mut self, res: ApiResult<Vec<Entry>>) -> bool {
        match res {
            Ok(list) => {
                log!("[cache] loaded {} entries", list.len());
                self.data = Some(list);
                true
            }
            Err(e) => {
                warn!("[cache] load failed ({:?}): {}", e.kind, e);
                false
            }
        }
    }
}

/// Per-view cache binding over `GET /tables`.
///
/// Each view creates its own instance; they are not shared.
#[derive(Clone, Copy)]
pub(crate) struct EntryCache {
    state: RwSignal<CacheState>,
    api_client: RwSignal<ApiClient>,
}

impl EntryCache {
    /// Tracked projection for rendering; see [`visible_entries`].
    pub fn visible(&self, query: &str, hidden: Option<&EntryId>) -> Option<Vec<Entry>> {
        self.state
            .with(|s| visible_entries(s.data.as_deref(), query, hidden))
    }

    /// Fire-and-forget re-fetch. Overlapping calls race; the last response to
    /// arrive wins. Responses for an unmounted view are dropped.
    pub fn revalidate(&self) {
        let api_client = self.api_client.get_untracked();
        let state = self.state;
        spawn_local(async move {
            let res = api_client.list_entries().await;
            if state.try_update(|s| s.apply(res)).is_none() {
                log!("[cache] view gone, response discarded");
            }
        });
    }
}

/// Binds a fresh cache to the current view and issues the initial read.
pub(crate) fn use_entry_cache() -> EntryCache {
    let app_state = expect_context::<AppContext>();
    let cache = EntryCache {
        state: RwSignal::new(CacheState::default()),
        api_client: app_state.0.api_client,
    };
    cache.revalidate();
    cache
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind};
    use crate::filter::filter_entries;
    use crate::models::EntryFields;

    fn entries() -> Vec<Entry> {
        ["Ann", "Bo"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| Entry {
                id: EntryId::from(i as u64 + 1),
                fields: EntryFields {
                    name: name.to_string(),
                    ..Default::default()
                },
            })
            .collect()
    }

    fn network_error() -> ApiError {
        ApiError {
            kind: ApiErrorKind::Network,
            message: "offline".to_string(),
        }
    }

    #[test]
    fn test_absent_until_first_response() {
        let state = CacheState::default();
        assert!(state.data.is_none());
    }

    #[test]
    fn test_failed_initial_load_stays_absent() {
        let mut state = CacheState::default();
        assert!(!state.apply(Err(network_error())));
        assert!(state.data.is_none());
    }

    #[test]
    fn test_failed_revalidation_keeps_previous_list() {
        let mut state = CacheState::default();
        state.apply(Ok(entries()));
        state.apply(Err(network_error()));
        assert_eq!(state.data, Some(entries()));
    }

    #[test]
    fn test_response_replaces_whole_list() {
        let mut state = CacheState::default();
        state.apply(Ok(entries()));
        state.apply(Ok(entries()[1..].to_vec()));
        assert_eq!(state.data.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_last_response_wins() {
        let mut state = CacheState::default();
        let older = entries();
        let newer = entries()[..1].to_vec();
        // Responses applied in arrival order, regardless of request order.
        state.apply(Ok(newer.clone()));
        state.apply(Ok(older.clone()));
        assert_eq!(state.data, Some(older));
    }

    #[test]
    fn test_repeated_revalidation_is_idempotent_for_rendering() {
        let mut state = CacheState::default();
        state.apply(Ok(entries()));
        let first = filter_entries(state.data.as_deref().unwrap_or_default(), "an");
        state.apply(Ok(entries()));
        let second = filter_entries(state.data.as_deref().unwrap_or_default(), "an");
        assert_eq!(first, second);
    }
}
