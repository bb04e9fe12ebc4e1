//! Landing page after sign-in.

use crate::frontend::services::AuthState;
use dioxus::prelude::*;

#[component]
pub fn Dashboard() -> Element {
    let auth = use_context::<AuthState>();

    let Some(user) = auth.user() else {
        return rsx! {
            section {
                h1 { "Dashboard" }
                p { class: "muted", "Loading profile..." }
            }
        };
    };

    let last_login = user.last_login.map_or_else(
        || "First sign-in".to_string(),
        |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
    );

    let name = user.display_name().to_string();
    let email = user.email.clone();

    rsx! {
        section {
            h1 { "Welcome, {name}" }
            p {
                class: "muted",
                "{email}"
                if user.is_superadmin {
                    " "
                    span { class: "badge", "Superadmin" }
                }
            }
            p { "Last sign-in: {last_login}" }
        }
    }
}
