//! Authentication context and state management.

use crate::backend::api::UserProfile;
use crate::backend::services::{LoginResult, Session, SessionStore, StartupState};
use dioxus::prelude::*;

/// Session store handle plus a reactive mirror of its state.
///
/// Components read the signals; every change made through the store is
/// pushed into them, so guards and views re-render on login and logout.
#[derive(Clone)]
pub struct AuthState {
    store: SessionStore,
    pub session: Signal<Session>,
    pub startup: Signal<StartupState>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.session.read().user.clone()
    }

    /// True while the profile of a restored session is still loading.
    pub fn is_starting(&self) -> bool {
        *self.startup.read() == StartupState::Pending
    }

    pub async fn login(&self, email: &str, password: &str) -> LoginResult {
        let result = self.store.login(email, password).await;
        self.sync();
        result
    }

    pub async fn logout(&self) {
        self.store.logout().await;
        self.sync();
    }

    /// Copies the store's session into the signal right away, ahead of the
    /// subscription loop, so the guard re-renders against the new state.
    fn sync(&self) {
        let mut session = self.session;
        session.set(self.store.session());
    }
}

/// Provides [`AuthState`] to the component tree and keeps it in step with
/// `store`.
pub fn use_auth_provider(store: SessionStore) -> AuthState {
    let session = use_signal(|| store.session());
    let startup = use_signal(|| store.startup_state());

    let sessions = store.clone();
    use_future(move || {
        let store = sessions.clone();
        let mut session = session;
        async move {
            let mut updates = store.subscribe();
            session.set(updates.borrow_and_update().clone());
            while updates.changed().await.is_ok() {
                let snapshot = updates.borrow_and_update().clone();
                session.set(snapshot);
            }
        }
    });

    let startups = store.clone();
    use_future(move || {
        let store = startups.clone();
        let mut startup = startup;
        async move {
            let mut updates = store.subscribe_startup();
            startup.set(*updates.borrow_and_update());
            while updates.changed().await.is_ok() {
                let state = *updates.borrow_and_update();
                startup.set(state);
            }
        }
    });

    use_context_provider(move || AuthState {
        store,
        session,
        startup,
    })
}
