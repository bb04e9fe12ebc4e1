use crate::backend::utils::guard::{self, Navigation};
use crate::backend::utils::route::Route;
use crate::frontend::services::AuthState;
use dioxus::prelude::*;
use dioxus_router::{components::Outlet, navigator, use_route};
use log::debug;

/// Outermost layout. Runs the navigation guard for the current route and
/// renders it only when the guard lets it through.
///
/// Reading the session signal here makes the guard re-run whenever the
/// authenticated flag changes, e.g. after a logout.
#[component]
pub fn Guard() -> Element {
    let route = use_route::<Route>();
    let auth = use_context::<AuthState>();
    let nav = navigator();

    match guard::evaluate(&route, auth.is_authenticated()) {
        Navigation::Proceed => rsx! { Outlet::<Route> {} },
        Navigation::Redirect(target) => {
            debug!("Guard redirects {route} to {target}");
            spawn(async move {
                nav.replace(target);
            });
            rsx! {}
        }
    }
}
