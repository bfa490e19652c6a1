use super::entries::{CreateButton, DeletionSink, EntryFormModal, EntryView, SearchBox};
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::notify::ViewKind;
use icons::{Pencil, Trash2};
use leptos::prelude::*;

/// Card grid over its own cache. Deletions here are published to the shell so
/// the table view can hide them.
#[component]
pub fn CardPage(sink: DeletionSink) -> impl IntoView {
    let cards = EntryView::new(ViewKind::Card, Some(sink));

    view! {
        <div class="p-5">
            <h1 class="mb-5 text-2xl font-bold text-primary">"Card Page"</h1>

            <SearchBox query=cards.query />
            <CreateButton handle=cards />

            <div class="grid grid-cols-1 gap-4 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4">
                {move || match cards.visible(None) {
                    Some(list) if !list.is_empty() => list
                        .into_iter()
                        .map(|card| {
                            let id = card.id.clone();
                            let f = card.fields.clone();
                            view! {
                                <div class="flex flex-col justify-between rounded-lg border bg-card p-4 shadow-md">
                                    <div class="flex-grow">
                                        <h2 class="text-xl font-semibold">{f.name}</h2>
                                        <p>"Surname: " {f.surname}</p>
                                        <p>"Age: " {f.age}</p>
                                        <p>"Description: " {f.description}</p>
                                        <p>"Total: " {f.total}</p>
                                        <p>"Workplace: " {f.workplace}</p>
                                    </div>
                                    <div class="mt-4 flex justify-between">
                                        <Button
                                            size=ButtonSize::Icon
                                            attr:aria-label="Edit"
                                            on:click=move |_| cards.open_edit(&card)
                                        >
                                            <Pencil />
                                        </Button>
                                        <Button
                                            variant=ButtonVariant::Destructive
                                            size=ButtonSize::Icon
                                            attr:aria-label="Delete"
                                            on:click=move |_| cards.delete(id.clone())
                                        >
                                            <Trash2 />
                                        </Button>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any(),
                    _ => view! { <p>"No cards available."</p> }.into_any(),
                }}
            </div>

            <EntryFormModal handle=cards />
        </div>
    }
}
