/*
[INPUT]:  HTTP client configuration and engine API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod dashboard;
pub mod error;
pub mod files;
pub mod issues;
pub mod tasks;

pub use error::{FlowdeskError, Result};

pub use client::{ClientConfig, FlowdeskClient};
