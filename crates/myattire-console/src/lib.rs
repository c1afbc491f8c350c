/*
[INPUT]:  Public API exports for myattire-console crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod cli;
pub mod config;
pub mod filters;
pub mod forms;
pub mod session_store;
pub mod tui;

// Re-export main types for convenience
pub use config::ConsoleConfig;
pub use filters::{TaskCounts, TaskFilters};
pub use session_store::SessionStore;
