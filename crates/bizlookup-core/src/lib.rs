//! Shared domain types and configuration for `bizlookup`.
//!
//! Everything here is free of network I/O: the resolution records produced by
//! the places pipeline, the per-query failure taxonomy, and the
//! environment-driven [`LookupConfig`].

pub mod app_config;
pub mod business;
pub mod config;

use thiserror::Error;

pub use app_config::LookupConfig;
pub use business::{
    BatchSummary, MatchConfidence, Resolution, ResolutionError, ResolvedBusiness, ReviewRecord,
};
pub use config::{load_lookup_config, load_lookup_config_from_env, API_KEY_VAR};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
