use crate::auth::{login_request, start_session, validate_login};
use crate::components::ui::{
    Alert, AlertDescription, Button, Card, CardContent, CardDescription, CardHeader, CardTitle,
    FieldError, Input, Label, Spinner,
};
use crate::state::AppContext;
use crate::util::now_ms;
use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

#[component]
pub fn LoginPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let login_error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    // Field errors show once a field was left or a submit was attempted.
    let username_touched = RwSignal::new(false);
    let password_touched = RwSignal::new(false);
    let submitted = RwSignal::new(false);

    let errors = Memo::new(move |_| validate_login(&username.get(), &password.get()));
    let username_error = Signal::derive(move || {
        (username_touched.get() || submitted.get())
            .then(|| errors.get().username)
            .flatten()
    });
    let password_error = Signal::derive(move || {
        (password_touched.get() || submitted.get())
            .then(|| errors.get().password)
            .flatten()
    });

    let app_state = expect_context::<AppContext>();
    let navigate = use_navigate();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        submitted.set(true);

        if !errors.get_untracked().is_empty() || loading.get_untracked() {
            return;
        }

        let req = login_request(&username.get_untracked(), &password.get_untracked());
        let mut api_client = app_state.0.api_client.get_untracked();
        let app_state = app_state.clone();
        let navigate = navigate.clone();

        loading.set(true);
        login_error.set(None);

        spawn_local(async move {
            match api_client.login(&req).await {
                Ok(res) => {
                    if start_session(&res, &req, now_ms()) {
                        log!("[auth] signed in as {}", req.username);
                        api_client.set_token(res.token);
                        app_state.0.api_client.set(api_client);
                        app_state.0.current_user.set(Some(res.user));
                        navigate("/dashboard", Default::default());
                    } else {
                        warn!("[auth] login response carried no token");
                    }
                }
                Err(e) => {
                    warn!("[auth] login failed ({:?}): {}", e.kind, e);
                    let _ = login_error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-md flex-col justify-center px-4 py-10">
                <Card>
                    <CardHeader>
                        <CardTitle class="text-2xl">"Login"</CardTitle>
                        <CardDescription class="text-xs">"Sign in to open the dashboard."</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form id="login" class="flex flex-col gap-4" on:submit=on_submit>
                            <Show when=move || login_error.get().is_some() fallback=|| ().into_view()>
                                {move || {
                                    login_error.get().map(|e| view! {
                                        <Alert class="border-destructive/30">
                                            <AlertDescription class="text-destructive">{e}</AlertDescription>
                                        </Alert>
                                    })
                                }}
                            </Show>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="username" class="text-xs">"Username"</Label>
                                <Input
                                    id="username"
                                    name="username"
                                    placeholder="Email or username"
                                    bind_value=username
                                    on_blur=Callback::new(move |_| username_touched.set(true))
                                    invalid=Signal::derive(move || username_error.get().is_some())
                                />
                                <FieldError message=username_error />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password" class="text-xs">"Password"</Label>
                                <Input
                                    id="password"
                                    name="password"
                                    r#type="password"
                                    placeholder="Password"
                                    bind_value=password
                                    on_blur=Callback::new(move |_| password_touched.set(true))
                                    invalid=Signal::derive(move || password_error.get().is_some())
                                />
                                <FieldError message=password_error />
                            </div>

                            <Button class="w-full" attr:disabled=move || loading.get()>
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Signing in..." } else { "Login" }}
                                </span>
                            </Button>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}
