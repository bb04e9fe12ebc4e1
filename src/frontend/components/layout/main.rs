use crate::backend::utils::route::Route;
use crate::frontend::assets::{BASE_CSS, SHELL_CSS};
use crate::frontend::services::AuthState;
use dioxus::prelude::*;
use dioxus_router::components::{Link, Outlet};

/// Sidebar shell shared by every authenticated section.
#[component]
pub fn Main() -> Element {
    let auth = use_context::<AuthState>();

    let account = match auth.user() {
        Some(user) => user.display_name().to_string(),
        None if auth.is_starting() => "Loading profile...".to_string(),
        None => String::new(),
    };

    // The guard sends the now anonymous session to the login page.
    let on_logout = move |_: MouseEvent| {
        let auth = auth.clone();
        spawn(async move { auth.logout().await });
    };

    rsx! {
        style { dangerous_inner_html: BASE_CSS }
        style { dangerous_inner_html: SHELL_CSS }

        div {
            class: "shell",
            nav {
                class: "sidebar",
                h1 { class: "brand", "Survey Console" }
                for section in Route::sections() {
                    Link {
                        key: "{section}",
                        class: "nav-link",
                        active_class: "active",
                        to: section.clone(),
                        {section.name()}
                    }
                }
                div {
                    class: "account",
                    span { "{account}" }
                    button { onclick: on_logout, "Sign out" }
                }
            }
            main {
                class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
