use super::card::CardPage;
use super::entries::DeletionSink;
use super::login::LoginPage;
use super::table::TablePage;
use crate::auth::end_session;
use crate::components::ui::{Button, ButtonSize};
use crate::state::{AppContext, Section, Shell};
use crate::util::now_ms;
use icons::LogOut;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use strum::IntoEnumIterator;

#[component]
pub fn RootAuthed(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.api_client.with(|c| c.is_authenticated());

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show when=is_authenticated fallback=move || view! { <LoginPage /> }>
            {move || children.with_value(|c| c())}
        </Show>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let shell: RwSignal<Shell> = RwSignal::new(Shell::default());
    // Only a section change remounts the active view; a published deletion must not.
    let section = Memo::new(move |_| shell.with(|s| s.section));
    let deleted_id = Signal::derive(move || shell.with(|s| s.deleted_id.clone()));

    // Current user, for the top bar.
    {
        let api_client = app_state.0.api_client.get_untracked();
        let current_user = app_state.0.current_user;
        spawn_local(async move {
            match api_client.current_user().await {
                Ok(user) => {
                    let _ = current_user.try_set(Some(user));
                }
                Err(e) => warn!("[auth] current user lookup failed ({:?}): {}", e.kind, e),
            }
        });
    }

    let display_name = move || {
        app_state
            .0
            .current_user
            .with(|u| u.as_ref().and_then(|u| u.display_name()))
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        end_session(now_ms());
        app_state.0.api_client.update(|c| c.logout());
        app_state.0.current_user.set(None);
        navigate.with_value(|nav| nav("/", Default::default()));
    };

    view! {
        <div class="flex min-h-screen bg-background text-foreground">
            <aside class="min-h-screen w-1/5 bg-primary p-10 text-primary-foreground">
                <h2 class="mb-2 text-2xl font-bold">"Dashboard"</h2>
                <ul class="mt-10 space-y-4">
                    {Section::iter()
                        .map(|s| {
                            let active = move || section.get() == s;
                            view! {
                                <li
                                    class=move || {
                                        if active() {
                                            "cursor-pointer text-2xl font-bold underline underline-offset-4"
                                        } else {
                                            "cursor-pointer text-2xl font-bold"
                                        }
                                    }
                                    on:click=move |_| shell.update(|sh| sh.select(s))
                                >
                                    {s.to_string()}
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </aside>

            <div class="w-full">
                <div class="flex items-center justify-end gap-3 bg-primary p-3 text-primary-foreground">
                    <span class="text-sm">{display_name}</span>
                    <Button size=ButtonSize::Sm on:click=on_logout>
                        <LogOut />
                        "LogOut"
                    </Button>
                </div>
                <div>
                    {move || match section.get() {
                        Section::Home => view! { <div class="p-5">"Home Page"</div> }.into_any(),
                        Section::Card => view! { <CardPage sink=DeletionSink(shell) /> }.into_any(),
                        Section::Table => view! { <TablePage deleted_id=deleted_id /> }.into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}
