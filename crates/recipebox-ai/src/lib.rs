#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultAiClient is used through RecipeAiPort, not its generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod prompts;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultAiClient;

// Configuration
pub use config::AiClientConfig;

// Construction errors
pub use error::AiError;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
