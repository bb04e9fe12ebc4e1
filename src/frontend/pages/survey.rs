//! Public survey page reached through an invitation link.

use crate::frontend::components::layout::AuthLayout;
use dioxus::prelude::*;

#[component]
pub fn Survey(token: String) -> Element {
    rsx! {
        AuthLayout {
            div {
                class: "auth-card",
                h1 { "Survey" }
                p { class: "muted", "Invitation {token}" }
            }
        }
    }
}
