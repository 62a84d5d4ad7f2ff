#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - DefaultApiClient is meant to be used
// through its inherent methods, not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod delegate;
mod error;
mod http;
mod retry;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{ApiClient, DefaultApiClient, RequestHandle, endpoints};

// Configuration
pub use config::ApiClientConfig;

// Callbacks and responses
pub use delegate::{ApiDelegate, ApiResponse};

// Errors
pub use error::{ApiError, ApiResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
