use crate::frontend::assets::{AUTH_CSS, BASE_CSS};
use dioxus::prelude::*;

/// Centered layout for the pages shown outside the sidebar shell: sign-in and
/// public survey links. The card fades in once it is mounted.
#[component]
pub fn AuthLayout(children: Element) -> Element {
    let mut mounted = use_signal(|| false);
    let state = if mounted() { "fade-in" } else { "fade-out" };

    rsx! {
        style { dangerous_inner_html: BASE_CSS }
        style { dangerous_inner_html: AUTH_CSS }

        div {
            class: "auth-container {state}",
            onmounted: move |_| mounted.set(true),
            {children}
        }
    }
}
