//! Turbopuffer client module.
//!
//! This module provides the HTTP client for the turbopuffer vector API
//! along with its configuration and credential handling.

mod credentials;
mod tpuf_client;
mod tpuf_config;

pub use credentials::ApiKey;
pub use tpuf_client::TurbopufferClient;
pub use tpuf_config::TurbopufferConfig;
