use crate::notify::ToastLevel;
use crate::state::AppContext;
use icons::X;
use leptos::prelude::*;

/// Fixed stack of transient notifications. Click to dismiss early.
#[component]
pub fn Toaster() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let toasts = app_state.0.toasts;

    view! {
        <div data-name="Toaster" class="pointer-events-none fixed top-4 right-4 z-100 flex w-80 flex-col gap-2">
            {move || {
                toasts
                    .get()
                    .items
                    .into_iter()
                    .map(|t| {
                        let id = t.id;
                        let tone = match t.level {
                            ToastLevel::Success => "border-success/40 text-success",
                            ToastLevel::Error => "border-destructive/40 text-destructive",
                        };
                        view! {
                            <div
                                role="status"
                                class=format!("pointer-events-auto flex items-start justify-between gap-3 rounded-md border bg-background px-4 py-3 text-sm shadow-lg hover:cursor-pointer {tone}")
                                on:click=move |_| toasts.update(|ts| ts.dismiss(id))
                            >
                                <span>{t.message}</span>
                                <X class="size-4 shrink-0 opacity-60" />
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
