//! Navigation guard.

use crate::backend::utils::route::Route;

/// Upper bound on redirects followed by [`destination`].
const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(Route),
}

/// Decides whether navigation to `target` may complete.
///
/// Rules, first match wins:
/// 1. an auth-required target without a session goes to `/login`;
/// 2. `/login` with a session goes to `/`;
/// 3. anything else proceeds.
///
/// The catch-all route is a plain redirect to `/` and is handled before the
/// rules run.
pub fn evaluate(target: &Route, authenticated: bool) -> Navigation {
    if matches!(target, Route::NotFound { .. }) {
        return Navigation::Redirect(Route::Dashboard {});
    }

    if target.requires_auth() && !authenticated {
        Navigation::Redirect(Route::Login {})
    } else if matches!(target, Route::Login {}) && authenticated {
        Navigation::Redirect(Route::Dashboard {})
    } else {
        Navigation::Proceed
    }
}

/// Route that ends up rendered when navigating to `path`, following
/// redirects.
pub fn destination(path: &str, authenticated: bool) -> Route {
    let mut route = path.parse::<Route>().unwrap_or(Route::Dashboard {});
    for _ in 0..MAX_REDIRECTS {
        match evaluate(&route, authenticated) {
            Navigation::Proceed => return route,
            Navigation::Redirect(next) => route = next,
        }
    }
    route
}
