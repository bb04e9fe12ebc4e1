//! Core services.

pub mod session;
pub mod storage;

pub use session::{LoginResult, Session, SessionStatus, SessionStore, StartupState};
pub use storage::{FileStorage, MemoryStorage, TokenStorage};
