use crate::api::ApiClient;
use crate::cache::{use_entry_cache, EntryCache};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Label, Spinner};
use crate::drafts::EntryForm;
use crate::models::{Entry, EntryField, EntryId};
use crate::notify::{Notifier, ViewKind};
use crate::state::{remove_entry, submit_entry, AppContext, Shell};
use icons::Plus;
use leptos::prelude::*;
use leptos::task::spawn_local;
use strum::IntoEnumIterator;

/// Where a view reports ids it deleted. Only the card view is handed one.
#[derive(Clone, Copy)]
pub(crate) struct DeletionSink(pub RwSignal<Shell>);

impl DeletionSink {
    fn publish(self, id: EntryId) {
        // The dashboard may be gone (logout) by the time a delete settles.
        let _ = self.0.try_update(|s| s.publish_deleted(id));
    }
}

/// Everything one view (card or table) owns: its own cache, search query and
/// modal form.
#[derive(Clone, Copy)]
pub(crate) struct EntryView {
    pub kind: ViewKind,
    pub cache: EntryCache,
    pub query: RwSignal<String>,
    pub form: RwSignal<EntryForm>,
    pub saving: RwSignal<bool>,
    api_client: RwSignal<ApiClient>,
    notifier: Notifier,
    sink: Option<DeletionSink>,
}

impl EntryView {
    pub fn new(kind: ViewKind, sink: Option<DeletionSink>) -> Self {
        let app_state = expect_context::<AppContext>();
        Self {
            kind,
            cache: use_entry_cache(),
            query: RwSignal::new(String::new()),
            form: RwSignal::new(EntryForm::default()),
            saving: RwSignal::new(false),
            api_client: app_state.0.api_client,
            notifier: app_state.0.notifier(),
            sink,
        }
    }

    pub fn visible(&self, hidden: Option<&EntryId>) -> Option<Vec<Entry>> {
        let q = self.query.get();
        self.cache.visible(&q, hidden)
    }

    pub fn open_create(self) {
        self.form.update(|f| f.open_create());
    }

    pub fn open_edit(self, entry: &Entry) {
        self.form.update(|f| f.open_edit(entry));
    }

    pub fn submit(self) {
        if self.saving.get_untracked() {
            return;
        }
        let Some(mutation) = self.form.with_untracked(|f| f.mutation()) else {
            return;
        };

        let api_client = self.api_client.get_untracked();
        self.saving.set(true);
        spawn_local(async move {
            let out = submit_entry(&api_client, self.kind, &mutation).await;
            let _ = self.form.try_update(|f| f.finish_submit(out.ok));
            let _ = self.saving.try_set(false);
            if out.revalidate {
                self.cache.revalidate();
            }
            self.notifier.notify(out.notice);
        });
    }

    pub fn delete(self, id: EntryId) {
        let api_client = self.api_client.get_untracked();
        spawn_local(async move {
            let out = remove_entry(&api_client, self.kind, &id).await;
            if out.revalidate {
                self.cache.revalidate();
            }
            self.notifier.notify(out.notice);
            if let (Some(id), Some(sink)) = (out.deleted, self.sink) {
                sink.publish(id);
            }
        });
    }
}

#[component]
pub fn SearchBox(query: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="mb-5">
            <Input bind_value=query placeholder="Search..." class="w-full" />
        </div>
    }
}

#[component]
pub fn CreateButton(handle: EntryView) -> impl IntoView {
    view! {
        <Button class="mb-5" on:click=move |_| handle.open_create()>
            <Plus />
            "Create"
        </Button>
    }
}

fn form_title(kind: ViewKind, editing: bool) -> &'static str {
    match (kind, editing) {
        (ViewKind::Card, false) => "Create New Card",
        (ViewKind::Card, true) => "Edit Card",
        (ViewKind::Table, false) => "Create New Table Entry",
        (ViewKind::Table, true) => "Edit Table Entry",
    }
}

fn entry_field_inputs(form: RwSignal<EntryForm>) -> impl IntoView {
    EntryField::iter()
        .map(|field| {
            let value = Signal::derive(move || form.with(|f| f.draft.get(field).to_string()));
            let on_value = Callback::new(move |v: String| form.update(|f| f.set_field(field, v)));
            let input_id = format!("entry-{}", field.key());
            view! {
                <div class="flex flex-col gap-1.5">
                    <Label html_for=input_id.clone() class="text-xs">{field.to_string()}</Label>
                    <Input
                        id=input_id
                        name=field.key()
                        placeholder=field.to_string()
                        value=value
                        on_value=on_value
                        class="h-8 text-sm"
                    />
                </div>
            }
        })
        .collect_view()
}

/// Create/edit modal. Submitting sends the draft as-is; cancel discards it.
#[component]
pub fn EntryFormModal(handle: EntryView) -> impl IntoView {
    let form = handle.form;
    let saving = handle.saving;
    let editing = move || form.with(|f| f.is_edit());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        handle.submit();
    };

    view! {
        <Show when=move || form.with(|f| f.open) fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 px-4">
                <div class="w-full max-w-md rounded-md border border-border bg-background p-5 shadow-lg">
                    <h2 class="mb-4 text-lg font-bold">{move || form_title(handle.kind, editing())}</h2>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        {entry_field_inputs(form)}
                        <div class="flex items-center justify-end gap-2 pt-2">
                            <Button size=ButtonSize::Sm attr:r#type="submit" attr:disabled=move || saving.get()>
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || saving.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if editing() { "Update" } else { "Create" }}
                                </span>
                            </Button>
                            <Button
                                variant=ButtonVariant::Secondary
                                size=ButtonSize::Sm
                                attr:r#type="button"
                                on:click=move |_| form.update(|f| f.close())
                            >
                                "Cancel"
                            </Button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_titles_per_view_and_mode() {
        assert_eq!(form_title(ViewKind::Card, false), "Create New Card");
        assert_eq!(form_title(ViewKind::Card, true), "Edit Card");
        assert_eq!(form_title(ViewKind::Table, false), "Create New Table Entry");
        assert_eq!(form_title(ViewKind::Table, true), "Edit Table Entry");
    }
}
