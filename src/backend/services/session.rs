//! Session state and the bearer token lifecycle.
//!
//! The store owns the in-memory [`Session`], mirrors the token into durable
//! storage and keeps the API client's bearer credential in step with it.
//! It is cheap to clone; clones share the same session.

use crate::backend::api::{ApiClient, AuthApi, Credentials, UserProfile};
use crate::backend::services::storage::{TOKEN_KEY, TokenStorage};
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Message shown when a failed login carries no server message.
pub const DEFAULT_LOGIN_ERROR: &str = "Error de autenticación";

/// Outcome of [`SessionStore::login`]; the error is ready for display.
pub type LoginResult = std::result::Result<(), String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
}

impl Session {
    /// True iff a non-empty token is held. The profile may still be loading.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    pub fn status(&self) -> SessionStatus {
        match (self.is_authenticated(), self.user.is_some()) {
            (false, _) => SessionStatus::Anonymous,
            (true, false) => SessionStatus::PendingProfile,
            (true, true) => SessionStatus::Authenticated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    /// Token held, profile not fetched yet.
    PendingProfile,
    Authenticated,
}

/// Progress of the profile fetch started by [`SessionStore::hydrate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StartupState {
    Pending,
    #[default]
    Ready,
}

pub struct SessionStore<A = ApiClient, S = Box<dyn TokenStorage>> {
    api: Arc<A>,
    storage: Arc<S>,
    state: Arc<watch::Sender<Session>>,
    startup: Arc<watch::Sender<StartupState>>,
}

impl<A, S> Clone for SessionStore<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            storage: Arc::clone(&self.storage),
            state: Arc::clone(&self.state),
            startup: Arc::clone(&self.startup),
        }
    }
}

impl<A: AuthApi, S: TokenStorage> SessionStore<A, S> {
    /// Creates an anonymous store. Call [`Self::hydrate`] to restore a
    /// persisted session.
    pub fn new(api: A, storage: S) -> Self {
        let (state, _) = watch::channel(Session::default());
        let (startup, _) = watch::channel(StartupState::Ready);
        Self {
            api: Arc::new(api),
            storage: Arc::new(storage),
            state: Arc::new(state),
            startup: Arc::new(startup),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    /// The held token, if non-empty.
    pub fn token(&self) -> Option<String> {
        self.state
            .borrow()
            .token
            .clone()
            .filter(|token| !token.is_empty())
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn startup_state(&self) -> StartupState {
        *self.startup.borrow()
    }

    pub fn subscribe_startup(&self) -> watch::Receiver<StartupState> {
        self.startup.subscribe()
    }

    /// Resolves once no startup profile fetch is in flight.
    pub async fn ready(&self) {
        let mut startup = self.startup.subscribe();
        let _ = startup.wait_for(|state| *state == StartupState::Ready).await;
    }

    /// Exchanges credentials for a token, persists it and loads the profile.
    ///
    /// On failure the session is left as it was and the error carries the
    /// server's message, or [`DEFAULT_LOGIN_ERROR`].
    pub async fn login(&self, email: &str, password: &str) -> LoginResult {
        info!("Login attempt for {email}");
        let credentials = Credentials::new(email, password);

        let token = match self.api.login(&credentials).await {
            Ok(response) if !response.access_token.is_empty() => response.access_token,
            Ok(_) => {
                warn!("Login response for {email} carried an empty token");
                return Err(DEFAULT_LOGIN_ERROR.to_string());
            }
            Err(e) => {
                error!("Login failed for {email}: {e}");
                return Err(e.detail().unwrap_or(DEFAULT_LOGIN_ERROR).to_string());
            }
        };

        if let Err(e) = self.storage.set(TOKEN_KEY, &token).await {
            error!("Failed to persist session token: {e}");
            return Err(DEFAULT_LOGIN_ERROR.to_string());
        }

        self.api.set_bearer(Some(&token));
        self.state.send_replace(Session {
            user: None,
            token: Some(token),
        });
        info!("Login succeeded for {email}");

        self.fetch_user().await;
        Ok(())
    }

    /// Loads the profile for the held token. Does nothing while anonymous.
    ///
    /// A rejected fetch logs the session out instead of returning an error.
    pub async fn fetch_user(&self) {
        let Some(token) = self.token() else {
            return;
        };

        match self.api.current_user().await {
            Ok(user) => {
                debug!("Fetched profile for {}", user.email);
                let applied = self.state.send_if_modified(|session| {
                    if session.token.as_deref() == Some(token.as_str()) {
                        session.user = Some(user);
                        true
                    } else {
                        false
                    }
                });
                if !applied {
                    debug!("Session token changed during profile fetch, discarding profile");
                }
            }
            Err(e) => {
                warn!("Profile fetch failed, logging out: {e}");
                if self.token().as_deref() == Some(token.as_str()) {
                    self.logout().await;
                }
            }
        }
    }

    /// Clears the session, the bearer credential and the persisted token.
    ///
    /// The in-memory session and the credential are cleared before the first
    /// await; only the storage write is pending after that.
    pub async fn logout(&self) {
        self.state.send_if_modified(|session| {
            let changed = *session != Session::default();
            *session = Session::default();
            changed
        });
        self.api.set_bearer(None);

        if let Err(e) = self.storage.remove(TOKEN_KEY).await {
            warn!("Failed to remove persisted token: {e}");
        }
        debug!("Session cleared");
    }

    /// Restores a persisted token, if any, and starts fetching its profile.
    ///
    /// The token is applied before this returns, so the session reads as
    /// authenticated while the fetch runs. [`Self::startup_state`] stays
    /// [`StartupState::Pending`] until the returned task finishes. Must be
    /// called within a tokio runtime.
    pub fn hydrate(&self) -> Option<JoinHandle<()>> {
        let token = match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => {
                debug!("No persisted session");
                return None;
            }
            Err(e) => {
                warn!("Could not read persisted session: {e}");
                return None;
            }
        };

        info!("Restoring persisted session");
        self.api.set_bearer(Some(&token));
        self.state.send_replace(Session {
            user: None,
            token: Some(token),
        });
        self.startup.send_replace(StartupState::Pending);

        let store = self.clone();
        Some(tokio::spawn(async move {
            store.fetch_user().await;
            store.startup.send_replace(StartupState::Ready);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::api::TokenResponse;
    use crate::backend::api::models::fixtures::NEW_ADMIN;
    use crate::backend::services::storage::StorageFuture;
    use crate::backend::services::storage::MemoryStorage;
    use crate::utils::{Error, ErrorKind, Result};
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    const PASSWORD: &str = "correct-horse";

    /// In-memory stand-in for the survey API.
    struct FakeApi {
        issued_token: String,
        online: bool,
        valid_tokens: Mutex<HashSet<String>>,
        bearer: Mutex<Option<String>>,
        profile_calls: AtomicUsize,
        // When set, profile requests wait for a notification before answering.
        gate: Option<Arc<Notify>>,
    }

    impl FakeApi {
        fn new() -> Self {
            Self {
                issued_token: "issued-token".to_string(),
                online: true,
                valid_tokens: Mutex::new(HashSet::from(["issued-token".to_string()])),
                bearer: Mutex::new(None),
                profile_calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn offline() -> Self {
            Self {
                online: false,
                ..Self::new()
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new()
            }
        }

        fn accept(&self, token: &str) {
            self.valid_tokens.lock().unwrap().insert(token.to_string());
        }

        fn revoke_all(&self) {
            self.valid_tokens.lock().unwrap().clear();
        }

        fn bearer(&self) -> Option<String> {
            self.bearer.lock().unwrap().clone()
        }

        fn profile_calls(&self) -> usize {
            self.profile_calls.load(Ordering::SeqCst)
        }
    }

    fn profile() -> UserProfile {
        serde_json::from_str(NEW_ADMIN).unwrap()
    }

    impl AuthApi for FakeApi {
        async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
            if !self.online {
                return Err(Error::new(ErrorKind::Network, "connection refused"));
            }
            if credentials.password != PASSWORD {
                return Err(Error::api(
                    401,
                    Some("Email o contraseña incorrectos".to_string()),
                ));
            }
            Ok(TokenResponse {
                access_token: self.issued_token.clone(),
                token_type: "bearer".to_string(),
            })
        }

        async fn current_user(&self) -> Result<UserProfile> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            let bearer = self.bearer();
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            let valid = bearer
                .as_ref()
                .is_some_and(|token| self.valid_tokens.lock().unwrap().contains(token));
            if valid {
                Ok(profile())
            } else {
                Err(Error::api(
                    401,
                    Some("No se pudo validar las credenciales".to_string()),
                ))
            }
        }

        fn set_bearer(&self, token: Option<&str>) {
            *self.bearer.lock().unwrap() = token.map(str::to_string);
        }
    }

    fn store(api: FakeApi, storage: MemoryStorage) -> SessionStore<FakeApi, MemoryStorage> {
        SessionStore::new(api, storage)
    }

    fn persisted(store: &SessionStore<FakeApi, MemoryStorage>) -> Option<String> {
        store.storage().get(TOKEN_KEY).unwrap()
    }

    #[test]
    fn authenticated_iff_token_non_empty() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.status(), SessionStatus::Anonymous);

        session.token = Some(String::new());
        assert!(!session.is_authenticated());

        session.token = Some("t".to_string());
        assert!(session.is_authenticated());
        assert_eq!(session.status(), SessionStatus::PendingProfile);

        session.user = Some(profile());
        assert_eq!(session.status(), SessionStatus::Authenticated);

        session.token = None;
        assert_eq!(session.status(), SessionStatus::Anonymous);
    }

    #[tokio::test]
    async fn login_with_valid_credentials() {
        let store = store(FakeApi::new(), MemoryStorage::new());

        let result = store.login("admin@example.com", PASSWORD).await;

        assert_eq!(result, Ok(()));
        assert_eq!(store.token().as_deref(), Some("issued-token"));
        assert_eq!(persisted(&store).as_deref(), Some("issued-token"));
        assert_eq!(store.api().bearer().as_deref(), Some("issued-token"));
        assert_eq!(store.user(), Some(profile()));
        assert_eq!(store.session().status(), SessionStatus::Authenticated);
    }

    #[tokio::test]
    async fn login_with_invalid_credentials_leaves_state() {
        let store = store(FakeApi::new(), MemoryStorage::new());
        let before = store.session();

        let result = store.login("admin@example.com", "wrong").await;

        assert_eq!(result, Err("Email o contraseña incorrectos".to_string()));
        assert_eq!(store.session(), before);
        assert_eq!(persisted(&store), None);
        assert_eq!(store.api().bearer(), None);
        assert_eq!(store.api().profile_calls(), 0);
    }

    #[tokio::test]
    async fn failed_login_keeps_existing_session() {
        let store = store(FakeApi::new(), MemoryStorage::new());
        store.login("admin@example.com", PASSWORD).await.unwrap();
        let before = store.session();

        let result = store.login("admin@example.com", "wrong").await;

        assert!(result.is_err());
        assert_eq!(store.session(), before);
        assert_eq!(persisted(&store).as_deref(), Some("issued-token"));
        assert_eq!(store.api().bearer().as_deref(), Some("issued-token"));
    }

    #[tokio::test]
    async fn network_failure_uses_default_message() {
        let store = store(FakeApi::offline(), MemoryStorage::new());

        let result = store.login("admin@example.com", PASSWORD).await;

        assert_eq!(result, Err(DEFAULT_LOGIN_ERROR.to_string()));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn empty_token_is_rejected() {
        let api = FakeApi {
            issued_token: String::new(),
            ..FakeApi::new()
        };
        let store = store(api, MemoryStorage::new());

        let result = store.login("admin@example.com", PASSWORD).await;

        assert_eq!(result, Err(DEFAULT_LOGIN_ERROR.to_string()));
        assert!(!store.is_authenticated());
        assert_eq!(persisted(&store), None);
    }

    struct ReadOnlyStorage;

    impl TokenStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set<'a>(&'a self, _key: &'a str, _value: &'a str) -> StorageFuture<'a> {
            Box::pin(async { Err(Error::storage("read-only storage")) })
        }

        fn remove<'a>(&'a self, _key: &'a str) -> StorageFuture<'a> {
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn unpersistable_token_fails_login() {
        let store = SessionStore::new(FakeApi::new(), ReadOnlyStorage);

        let result = store.login("admin@example.com", PASSWORD).await;

        assert_eq!(result, Err(DEFAULT_LOGIN_ERROR.to_string()));
        assert_eq!(store.session(), Session::default());
        assert_eq!(store.api().bearer(), None);
        assert_eq!(store.api().profile_calls(), 0);
    }

    #[tokio::test]
    async fn fetch_user_without_token_is_a_no_op() {
        let store = store(FakeApi::new(), MemoryStorage::new());

        store.fetch_user().await;

        assert_eq!(store.api().profile_calls(), 0);
        assert_eq!(store.session(), Session::default());
    }

    #[tokio::test]
    async fn fetch_user_with_expired_token_clears_everything() {
        let store = store(FakeApi::new(), MemoryStorage::new());
        store.login("admin@example.com", PASSWORD).await.unwrap();
        store.api().revoke_all();

        store.fetch_user().await;

        assert_eq!(store.user(), None);
        assert_eq!(store.token(), None);
        assert_eq!(persisted(&store), None);
        assert_eq!(store.api().bearer(), None);
    }

    #[tokio::test]
    async fn login_succeeds_even_if_profile_is_rejected() {
        let store = store(FakeApi::new(), MemoryStorage::new());
        store.api().revoke_all();

        let result = store.login("admin@example.com", PASSWORD).await;

        assert_eq!(result, Ok(()));
        assert!(!store.is_authenticated());
        assert_eq!(persisted(&store), None);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let store = store(FakeApi::new(), MemoryStorage::new());
        store.login("admin@example.com", PASSWORD).await.unwrap();

        store.logout().await;
        let once = store.session();
        store.logout().await;

        assert_eq!(store.session(), once);
        assert_eq!(once, Session::default());
        assert_eq!(persisted(&store), None);
        assert_eq!(store.api().bearer(), None);
    }

    #[tokio::test]
    async fn subscribers_see_login_and_logout() {
        let store = store(FakeApi::new(), MemoryStorage::new());
        let mut rx = store.subscribe();

        store.login("admin@example.com", PASSWORD).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_authenticated());

        store.logout().await;
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().is_authenticated());
    }

    #[tokio::test]
    async fn hydrate_without_persisted_token() {
        let store = store(FakeApi::new(), MemoryStorage::new());

        assert!(store.hydrate().is_none());
        assert_eq!(store.startup_state(), StartupState::Ready);
        assert!(!store.is_authenticated());
        assert_eq!(store.api().bearer(), None);
    }

    #[tokio::test]
    async fn hydrate_authenticates_before_profile_arrives() {
        let gate = Arc::new(Notify::new());
        let api = FakeApi::gated(Arc::clone(&gate));
        api.accept("persisted");
        let store = store(api, MemoryStorage::with_token("persisted"));

        let task = store.hydrate().expect("persisted token starts a fetch");

        assert!(store.is_authenticated());
        assert_eq!(store.session().status(), SessionStatus::PendingProfile);
        assert_eq!(store.startup_state(), StartupState::Pending);
        assert_eq!(store.api().bearer().as_deref(), Some("persisted"));

        gate.notify_one();
        store.ready().await;
        task.await.unwrap();

        assert_eq!(store.startup_state(), StartupState::Ready);
        assert_eq!(store.session().status(), SessionStatus::Authenticated);
    }

    #[tokio::test]
    async fn hydrate_with_stale_token_ends_anonymous() {
        let store = store(FakeApi::new(), MemoryStorage::with_token("stale"));

        let task = store.hydrate().unwrap();
        task.await.unwrap();

        assert_eq!(store.startup_state(), StartupState::Ready);
        assert_eq!(store.session(), Session::default());
        assert_eq!(persisted(&store), None);
        assert_eq!(store.api().bearer(), None);
    }

    #[tokio::test]
    async fn logout_during_startup_fetch_wins() {
        let gate = Arc::new(Notify::new());
        let api = FakeApi::gated(Arc::clone(&gate));
        api.accept("persisted");
        let store = store(api, MemoryStorage::with_token("persisted"));

        let task = store.hydrate().unwrap();
        while store.api().profile_calls() == 0 {
            tokio::task::yield_now().await;
        }
        store.logout().await;
        gate.notify_one();
        task.await.unwrap();

        assert_eq!(store.api().profile_calls(), 1);
        assert_eq!(store.session(), Session::default());
        assert_eq!(store.startup_state(), StartupState::Ready);
    }

    #[tokio::test]
    async fn clones_share_the_session() {
        let store = store(FakeApi::new(), MemoryStorage::new());
        let other = store.clone();

        store.login("admin@example.com", PASSWORD).await.unwrap();
        assert!(other.is_authenticated());

        other.logout().await;
        assert!(!store.is_authenticated());
    }
}
