use super::entries::{CreateButton, EntryFormModal, EntryView, SearchBox};
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::models::EntryId;
use crate::notify::ViewKind;
use icons::{Pencil, Trash2};
use leptos::prelude::*;

const COLUMNS: [&str; 7] = [
    "Name",
    "Surname",
    "Age",
    "Description",
    "Total",
    "Workplace",
    "Actions",
];

/// Table over its own cache, additionally hiding the id last deleted from the
/// card view. Its own deletions are not published anywhere.
#[component]
pub fn TablePage(#[prop(into)] deleted_id: Signal<Option<EntryId>>) -> impl IntoView {
    let rows = EntryView::new(ViewKind::Table, None);

    let cell = "border-b px-4 py-2 text-left";

    view! {
        <div class="p-5">
            <h1 class="mb-5 text-2xl font-bold text-primary">"Table Page"</h1>

            <SearchBox query=rows.query />
            <CreateButton handle=rows />

            <table class="min-w-full border bg-background">
                <thead>
                    <tr>
                        {COLUMNS
                            .into_iter()
                            .map(|c| view! { <th class=cell>{c}</th> })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let hidden = deleted_id.get();
                        match rows.visible(hidden.as_ref()) {
                            Some(list) if !list.is_empty() => list
                                .into_iter()
                                .map(|row| {
                                    let id = row.id.clone();
                                    let f = row.fields.clone();
                                    view! {
                                        <tr>
                                            <td class=cell>{f.name}</td>
                                            <td class=cell>{f.surname}</td>
                                            <td class=cell>{f.age}</td>
                                            <td class=cell>{f.description}</td>
                                            <td class=cell>{f.total}</td>
                                            <td class=cell>{f.workplace}</td>
                                            <td class="flex gap-2 border-b px-4 py-2">
                                                <Button
                                                    size=ButtonSize::Icon
                                                    attr:aria-label="Edit"
                                                    on:click=move |_| rows.open_edit(&row)
                                                >
                                                    <Pencil />
                                                </Button>
                                                <Button
                                                    variant=ButtonVariant::Destructive
                                                    size=ButtonSize::Icon
                                                    attr:aria-label="Delete"
                                                    on:click=move |_| rows.delete(id.clone())
                                                >
                                                    <Trash2 />
                                                </Button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                                .into_any(),
                            _ => view! {
                                <tr>
                                    <td colspan="7" class="py-4 text-center">
                                        "No matching records found"
                                    </td>
                                </tr>
                            }
                            .into_any(),
                        }
                    }}
                </tbody>
            </table>

            <EntryFormModal handle=rows />
        </div>
    }
}
