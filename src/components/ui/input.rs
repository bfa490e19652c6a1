use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Text input bound either to a signal of its own (`bind_value`) or to an
/// external value + change callback (`value` / `on_value`).
#[component]
pub fn Input(
    #[prop(into, optional)] class: String,

    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] required: bool,
    #[prop(optional)] autofocus: bool,

    // Two-way binding, wired by hand instead of `bind:value`.
    #[prop(into, optional)] bind_value: Option<RwSignal<String>>,

    #[prop(into, optional)] value: Option<Signal<String>>,
    #[prop(into, optional)] on_value: Option<Callback<String>>,
    #[prop(into, optional)] on_blur: Option<Callback<()>>,
    #[prop(into, optional)] invalid: Option<Signal<bool>>,

    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground border-input flex h-9 w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm",
        "focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2",
        "aria-invalid:ring-destructive/20 aria-invalid:border-destructive",
        class
    );

    let current = move || match (bind_value, value) {
        (Some(b), _) => b.get(),
        (None, Some(v)) => v.get(),
        (None, None) => String::new(),
    };

    let on_input = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let v = input.value();
        if let Some(b) = bind_value {
            b.set(v.clone());
        }
        if let Some(cb) = on_value {
            cb.run(v);
        }
    };

    let on_blur_ev = move |_ev: web_sys::FocusEvent| {
        if let Some(cb) = on_blur {
            cb.run(());
        }
    };

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            required=required
            autofocus=autofocus
            aria-invalid=move || if invalid.is_some_and(|i| i.get()) { "true" } else { "false" }
            prop:value=current
            on:input=on_input
            on:blur=on_blur_ev
            node_ref=node_ref
        />
    }
    .into_any()
}
