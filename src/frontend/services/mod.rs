//! Frontend services for session state shared across components.

pub mod context;

pub use context::{AuthState, use_auth_provider};
