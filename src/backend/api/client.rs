//! HTTP client for the survey API.

use crate::backend::api::models::{ApiErrorBody, Credentials, TokenResponse, UserProfile};
use crate::backend::api::AuthApi;
use crate::backend::utils::config::ApiConfig;
use crate::utils::{Error, Result};
use log::{debug, warn};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::RwLock;

/// API client bound to one base URL.
///
/// While a bearer token is set, it is attached to every request the client
/// builds.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Token currently attached to outgoing requests.
    pub fn bearer(&self) -> Option<String> {
        self.bearer.read().ok().and_then(|guard| guard.clone())
    }

    /// Starts a request to `path`, with the bearer credential when one is set.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("{} responded {status}", response.url().path());

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = ApiErrorBody::message_from(&body);
        warn!(
            "API request failed with {status}: {}",
            detail.as_deref().unwrap_or("no detail")
        );
        Err(Error::api(status.as_u16(), detail))
    }
}

impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
        self.post("/auth/login", credentials).await
    }

    async fn current_user(&self) -> Result<UserProfile> {
        self.get("/auth/me").await
    }

    fn set_bearer(&self, token: Option<&str>) {
        match self.bearer.write() {
            Ok(mut guard) => *guard = token.map(str::to_string),
            Err(_) => warn!("Bearer lock poisoned, credential left unchanged"),
        }
    }
}
