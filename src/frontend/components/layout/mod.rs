//! Layout components.

pub mod auth;
pub mod guard;
pub mod main;

pub use auth::AuthLayout;
pub use guard::Guard;
pub use main::Main;
