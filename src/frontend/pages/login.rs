//! Sign-in page.

use crate::frontend::components::layout::AuthLayout;
use crate::frontend::services::AuthState;
use dioxus::prelude::*;

#[component]
pub fn Login() -> Element {
    let auth = use_context::<AuthState>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let error = use_signal(|| None::<String>);
    let loading = use_signal(|| false);

    let on_submit = move |e: FormEvent| {
        e.prevent_default();
        if loading() {
            return;
        }

        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();
        let auth = auth.clone();
        let mut error = error;
        let mut loading = loading;

        error.set(None);
        loading.set(true);
        spawn(async move {
            // On success the guard moves the now authenticated session to `/`.
            if let Err(message) = auth.login(&email_value, &password_value).await {
                error.set(Some(message));
            }
            loading.set(false);
        });
    };

    rsx! {
        AuthLayout {
            form {
                class: "auth-card",
                onsubmit: on_submit,
                h1 { "Survey Console" }
                p { class: "muted", "Sign in with your administrator account" }
                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    r#type: "email",
                    value: "{email()}",
                    autofocus: true,
                    oninput: move |e| email.set(e.value()),
                }
                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    r#type: "password",
                    value: "{password()}",
                    oninput: move |e| password.set(e.value()),
                }
                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
                if let Some(message) = error() {
                    div { class: "error-message", "{message}" }
                } else {
                    div { class: "error-message-placeholder" }
                }
            }
        }
    }
}
