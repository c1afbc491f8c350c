/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public My Attire adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{SessionData, SessionManager, SESSION_TTL_SECONDS};

// Re-export commonly used types from http
pub use http::{ClientConfig, MyAttireClient, MyAttireError, Result};

// Re-export all types
pub use types::*;
