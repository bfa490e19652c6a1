use crate::api::EntryService;
use crate::drafts::Mutation;
use crate::models::EntryId;
use crate::notify::{Notice, ViewKind};
use leptos::logging::warn;

/// What the view must do after a create/update/delete settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FlowOutcome {
    pub ok: bool,
    pub notice: Notice,
    /// Re-fetch this view's cache. Only after a success.
    pub revalidate: bool,
    /// Id to publish on the cross-view deletion signal.
    pub deleted: Option<EntryId>,
}

impl FlowOutcome {
    fn success(notice: Notice) -> Self {
        Self {
            ok: true,
            notice,
            revalidate: true,
            deleted: None,
        }
    }

    fn failure(notice: Notice) -> Self {
        Self {
            ok: false,
            notice,
            revalidate: false,
            deleted: None,
        }
    }
}

/// Sends one create or update for the submitted draft.
pub(crate) async fn submit_entry<S: EntryService>(
    svc: &S,
    view: ViewKind,
    mutation: &Mutation,
) -> FlowOutcome {
    let res = match mutation {
        Mutation::Create(fields) => svc.create_entry(fields).await.map(|_| Notice::Created(view)),
        Mutation::Update { id, fields } => svc
            .update_entry(id, fields)
            .await
            .map(|_| Notice::Updated(view)),
    };

    match res {
        Ok(notice) => FlowOutcome::success(notice),
        Err(e) => {
            warn!("[entries] save failed ({:?}): {}", e.kind, e);
            FlowOutcome::failure(Notice::SaveFailed)
        }
    }
}

/// Sends one delete. Only card-view deletions feed the cross-view signal.
pub(crate) async fn remove_entry<S: EntryService>(
    svc: &S,
    view: ViewKind,
    id: &EntryId,
) -> FlowOutcome {
    match svc.delete_entry(id).await {
        Ok(()) => FlowOutcome {
            deleted: (view == ViewKind::Card).then(|| id.clone()),
            ..FlowOutcome::success(Notice::Deleted(view))
        },
        Err(e) => {
            warn!("[entries] delete of {id} failed ({:?}): {}", e.kind, e);
            FlowOutcome::failure(Notice::DeleteFailed(view))
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind, ApiResult};
    use crate::cache::CacheState;
    use crate::drafts::EntryForm;
    use crate::filter::{exclude_deleted, filter_entries};
    use crate::models::{Entry, EntryField, EntryFields};
    use crate::state::Shell;
    use std::cell::RefCell;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Call {
        List,
        Create(EntryFields),
        Update(EntryId, EntryFields),
        Delete(EntryId),
    }

    /// In-memory collection that records every call.
    #[derive(Default)]
    struct FakeCollection {
        rows: RefCell<Vec<Entry>>,
        calls: RefCell<Vec<Call>>,
        fail: bool,
    }

    impl FakeCollection {
        fn with_rows(rows: Vec<Entry>) -> Self {
            Self {
                rows: RefCell::new(rows),
                ..Default::default()
            }
        }

        fn failing(rows: Vec<Entry>) -> Self {
            Self {
                fail: true,
                ..Self::with_rows(rows)
            }
        }

        fn server_error() -> ApiError {
            ApiError::http(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom")
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }
    }

    impl EntryService for FakeCollection {
        async fn list_entries(&self) -> ApiResult<Vec<Entry>> {
            self.calls.borrow_mut().push(Call::List);
            Ok(self.rows.borrow().clone())
        }

        async fn create_entry(&self, fields: &EntryFields) -> ApiResult<Option<Entry>> {
            self.calls.borrow_mut().push(Call::Create(fields.clone()));
            if self.fail {
                return Err(Self::server_error());
            }
            let next = self.rows.borrow().len() as u64 + 1;
            let entry = Entry {
                id: EntryId::from(next),
                fields: fields.clone(),
            };
            self.rows.borrow_mut().push(entry.clone());
            Ok(Some(entry))
        }

        async fn update_entry(&self, id: &EntryId, fields: &EntryFields) -> ApiResult<Option<Entry>> {
            self.calls
                .borrow_mut()
                .push(Call::Update(id.clone(), fields.clone()));
            if self.fail {
                return Err(Self::server_error());
            }
            let mut rows = self.rows.borrow_mut();
            let Some(row) = rows.iter_mut().find(|e| &e.id == id) else {
                return Err(ApiError {
                    kind: ApiErrorKind::Http,
                    message: "Not Found".to_string(),
                });
            };
            row.fields = fields.clone();
            Ok(Some(row.clone()))
        }

        async fn delete_entry(&self, id: &EntryId) -> ApiResult<()> {
            self.calls.borrow_mut().push(Call::Delete(id.clone()));
            if self.fail {
                return Err(Self::server_error());
            }
            self.rows.borrow_mut().retain(|e| &e.id != id);
            Ok(())
        }
    }

    fn row(id: u64, name: &str) -> Entry {
        Entry {
            id: EntryId::from(id),
            fields: EntryFields {
                name: name.to_string(),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_create_sends_one_call_without_identity_and_closes_form() {
        let svc = FakeCollection::default();
        let mut form = EntryForm::default();
        form.open_create();
        form.set_field(EntryField::Name, "Cy".to_string());

        let mutation = form.mutation().expect("form is open");
        let out = submit_entry(&svc, ViewKind::Card, &mutation).await;
        form.finish_submit(out.ok);

        assert_eq!(svc.calls().len(), 1);
        match &svc.calls()[0] {
            Call::Create(fields) => {
                let body = serde_json::to_value(fields).expect("should serialize");
                assert!(body.get("id").is_none());
                assert_eq!(body["name"], "Cy");
            }
            other => panic!("expected create, got {other:?}"),
        }
        assert!(out.revalidate);
        assert_eq!(out.notice, Notice::Created(ViewKind::Card));
        assert!(!form.open);
    }

    #[tokio::test]
    async fn test_update_targets_edit_id_with_current_values() {
        let svc = FakeCollection::with_rows(vec![row(7, "Ann")]);
        let mut form = EntryForm::default();
        form.open_edit(&row(7, "Ann"));
        form.set_field(EntryField::Surname, "Lee".to_string());

        let mutation = form.mutation().expect("form is open");
        let out = submit_entry(&svc, ViewKind::Table, &mutation).await;

        let expected = EntryFields {
            name: "Ann".to_string(),
            surname: "Lee".to_string(),
            ..Default::default()
        };
        assert_eq!(svc.calls(), vec![Call::Update(EntryId::from(7), expected)]);
        assert_eq!(out.notice, Notice::Updated(ViewKind::Table));
        assert!(out.ok);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_and_skips_revalidation() {
        let svc = FakeCollection::failing(vec![]);
        let mut form = EntryForm::default();
        form.open_create();
        form.set_field(EntryField::Total, "12".to_string());

        let mutation = form.mutation().expect("form is open");
        let out = submit_entry(&svc, ViewKind::Card, &mutation).await;
        form.finish_submit(out.ok);

        assert_eq!(out.notice, Notice::SaveFailed);
        assert!(!out.revalidate);
        assert!(form.open);
        assert_eq!(form.draft.total, "12");
    }

    #[tokio::test]
    async fn test_stale_edit_target_fails_with_generic_notice() {
        let svc = FakeCollection::with_rows(vec![row(1, "Ann")]);
        let mut form = EntryForm::default();
        form.open_edit(&row(9, "Gone"));

        let mutation = form.mutation().expect("form is open");
        let out = submit_entry(&svc, ViewKind::Card, &mutation).await;
        assert_eq!(out.notice, Notice::SaveFailed);
        assert_eq!(svc.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_card_delete_publishes_signal_hiding_row_in_table() {
        let svc = FakeCollection::with_rows(vec![row(1, "Ann"), row(3, "Cy")]);
        let mut shell = Shell::default();

        // Table view's own cache still holds the deleted row.
        let mut table_cache = CacheState::default();
        table_cache.apply(svc.list_entries().await);

        let out = remove_entry(&svc, ViewKind::Card, &EntryId::from(3)).await;
        assert!(out.revalidate);
        assert_eq!(out.notice, Notice::Deleted(ViewKind::Card));
        if let Some(id) = out.deleted {
            shell.publish_deleted(id);
        }

        let rendered = exclude_deleted(
            filter_entries(table_cache.data.as_deref().unwrap_or_default(), ""),
            shell.deleted_id.as_ref(),
        );
        assert_eq!(rendered, vec![row(1, "Ann")]);
        assert!(svc.calls().contains(&Call::Delete(EntryId::from(3))));
    }

    #[tokio::test]
    async fn test_table_delete_does_not_publish_signal() {
        let svc = FakeCollection::with_rows(vec![row(2, "Bo")]);
        let out = remove_entry(&svc, ViewKind::Table, &EntryId::from(2)).await;
        assert!(out.ok);
        assert!(out.deleted.is_none());
        assert_eq!(out.notice, Notice::Deleted(ViewKind::Table));
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_cache_and_does_not_revalidate() {
        let svc = FakeCollection::failing(vec![row(1, "Ann"), row(2, "Bo")]);
        let mut cache = CacheState::default();
        cache.apply(svc.list_entries().await);

        let out = remove_entry(&svc, ViewKind::Card, &EntryId::from(1)).await;
        assert_eq!(out.notice, Notice::DeleteFailed(ViewKind::Card));
        assert!(!out.revalidate);
        assert!(out.deleted.is_none());
        assert_eq!(cache.data, Some(vec![row(1, "Ann"), row(2, "Bo")]));
        // One list for the initial load, one delete, no re-fetch.
        assert_eq!(
            svc.calls(),
            vec![Call::List, Call::Delete(EntryId::from(1))]
        );
    }

    #[tokio::test]
    async fn test_revalidation_after_create_shows_new_row() {
        let svc = FakeCollection::with_rows(vec![row(1, "Ann")]);
        let mut cache = CacheState::default();
        cache.apply(svc.list_entries().await);

        let out = submit_entry(
            &svc,
            ViewKind::Table,
            &Mutation::Create(EntryFields {
                name: "Bo".to_string(),
                ..Default::default()
            }),
        )
        .await;
        if out.revalidate {
            cache.apply(svc.list_entries().await);
        }

        let names: Vec<String> = cache
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.fields.name)
            .collect();
        assert_eq!(names, ["Ann", "Bo"]);
    }
}
