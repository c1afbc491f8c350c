/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod sectors;
pub mod tasks;
pub mod users;

pub use error::{MyAttireError, Result};

pub use client::{ClientConfig, MyAttireClient};
