//! Shared utilities, configuration, and error handling for the storefront
//!
//! This crate provides common functionality used across the storefront crates:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Validated JSON request extraction
//! - Password hashing

pub mod config;
pub mod crypto;
pub mod error;
pub mod extractors;

pub use config::{Config, LogFormat};
pub use crypto::{hash_password, verify_password, verify_password_without_account, PasswordError};
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
