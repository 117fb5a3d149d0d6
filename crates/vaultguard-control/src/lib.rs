//! Vault control core: authentication, environment monitoring, and the
//! supervising state machine.
//!
//! This crate contains the decision logic of the Vaultguard enclosure. It is
//! written against the port traits in `vaultguard-hardware` and owns no
//! peripheral details:
//!
//! - [`AccessController`] turns card reads and keypad input into grant/deny
//!   and PIN match decisions. It never drives actuators.
//! - [`EnvironmentMonitor`] turns sensor samples into alarm decisions under
//!   the configured policy, maintaining the baseline and motion level.
//! - [`VaultSupervisor`] composes the two, owns the authoritative
//!   [`VaultState`](vaultguard_core::VaultState), and commands the actuator
//!   block from its per-cycle `tick`.

pub mod access;
pub mod monitor;
pub mod state;
pub mod supervisor;

pub use access::{AccessController, AuthOutcome, PinOutcome};
pub use monitor::{AlarmDecision, EnvironmentMonitor, TriggerReason};
pub use state::{StateTransition, VaultStateMachine};
pub use supervisor::VaultSupervisor;
