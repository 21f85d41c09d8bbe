//! Shared types, errors, and configuration for RAO.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision and `en-PH` peso formatting
//! - Lenient coercion of upstream record fields
//! - Typed IDs for budget items and obligations
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ServerConfig, SourceConfig, SourceKind};
pub use error::{AppError, AppResult};
