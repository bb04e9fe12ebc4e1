//! Utility modules for the console backend.
//!
//! Configuration, path management and the routing table live here.

/// Application configuration.
pub mod config;
/// Navigation guard rules.
pub mod guard;
/// Path utilities for the application directory.
pub mod paths;
/// Application routing system.
pub mod route;
