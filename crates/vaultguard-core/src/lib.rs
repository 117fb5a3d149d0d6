//! Core domain types for the Vaultguard access-controlled enclosure.
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: credential and PIN value types with constant-time comparison,
//! sensor readings and the alarm baseline, the vault state enum, and the
//! validated configuration surface.
//!
//! Nothing in here touches hardware or performs I/O; the types are pure data
//! with their validation rules attached at construction.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{AlarmPolicy, PinTimeoutPolicy, VaultConfig, VaultConfigBuilder};
pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
