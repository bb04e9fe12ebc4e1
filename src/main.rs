mod backend;
mod frontend;
mod utils;

use crate::backend::api::ApiClient;
use crate::backend::services::{FileStorage, MemoryStorage, SessionStore, TokenStorage};
use crate::backend::utils::config::AppConfig;
use crate::backend::utils::route::Route;
use crate::frontend::services::use_auth_provider;
use anyhow::Context;
use dioxus::LaunchBuilder;
use dioxus::prelude::*;
use dioxus_desktop::{Config, LogicalSize, WindowBuilder};
use dioxus_router::Router;
use log::{info, warn};
use std::sync::OnceLock;
use tokio::runtime::Runtime;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn main() -> anyhow::Result<()> {
    // Logging setup
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Using default configuration: {e}");
        AppConfig::default()
    });

    // Initialize runtime once
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create runtime")?;
    let rt = RUNTIME.get_or_init(|| runtime);
    let _guard = rt.enter();

    let api = ApiClient::new(&config.api).context("Failed to create API client")?;
    info!("API base URL: {}", api.base_url());
    let store = SessionStore::new(api, open_storage(&config));
    let _startup = store.hydrate();

    let size = LogicalSize::new(config.window.width, config.window.height);
    let desktop = Config::default()
        .with_window(
            WindowBuilder::new()
                .with_title(config.window.title.clone())
                .with_inner_size(size)
                .with_min_inner_size(size),
        )
        .with_menu(None);

    LaunchBuilder::new()
        .with_cfg(desktop)
        .with_context(store)
        .launch(AppRoot);
    Ok(())
}

/// Token storage from the configuration; in-memory when no data directory
/// can be determined.
fn open_storage(config: &AppConfig) -> Box<dyn TokenStorage> {
    match config.storage.path() {
        Ok(path) => {
            info!("Session storage: {}", path.display());
            Box::new(FileStorage::new(path))
        }
        Err(e) => {
            warn!("Session will not persist across restarts: {e}");
            Box::new(MemoryStorage::new())
        }
    }
}

#[component]
fn AppRoot() -> Element {
    let store = use_context::<SessionStore>();
    use_auth_provider(store);
    rsx! { Router::<Route> {} }
}
