//! Remote API access.

pub mod client;
pub mod models;

pub use client::ApiClient;
pub use models::{Credentials, TokenResponse, UserProfile};

use crate::utils::Result;
use std::future::Future;

/// Authentication endpoints the session store depends on.
pub trait AuthApi: Send + Sync + 'static {
    /// `POST /auth/login`.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<TokenResponse>> + Send;

    /// `GET /auth/me`, authenticated with the current bearer credential.
    fn current_user(&self) -> impl Future<Output = Result<UserProfile>> + Send;

    /// Sets or clears the bearer credential attached to outgoing requests.
    fn set_bearer(&self, token: Option<&str>);
}
