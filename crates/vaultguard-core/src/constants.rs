//! Core constants for the vault access-control loop.
//!
//! These values centralize the polling cadence, credential format limits,
//! default alarm thresholds, and operator-facing status messages used
//! throughout the Vaultguard workspace. The defaults mirror the field
//! deployments this implementation was derived from; all of them can be
//! overridden through [`VaultConfig`](crate::config::VaultConfig).

// ============================================================================
// Control Loop Timing
// ============================================================================

/// Default duration of one supervisor polling cycle (milliseconds).
///
/// One cycle performs at most one authentication attempt followed by at most
/// one environment evaluation. Low-single-digit seconds is the granularity
/// the hardware deployments use; 2000 ms balances sensor freshness against
/// DHT-class sensor read limits.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vaultguard_core::constants::DEFAULT_CYCLE_MS;
///
/// let cycle = Duration::from_millis(DEFAULT_CYCLE_MS);
/// assert_eq!(cycle.as_secs(), 2);
/// ```
pub const DEFAULT_CYCLE_MS: u64 = 2000;

/// Default pause between keypad polls while accumulating a PIN (milliseconds).
///
/// This is the debounce interval for matrix keypads; it also paces the busy
/// loop so a held key is not read twice.
pub const DEFAULT_KEY_DEBOUNCE_MS: u64 = 100;

// ============================================================================
// Credential Format Constraints
// ============================================================================

/// Minimum card UID length in bytes (ISO 14443).
pub const MIN_UID_LENGTH: usize = 4;

/// Maximum card UID length in bytes (ISO 14443).
pub const MAX_UID_LENGTH: usize = 10;

/// Required length of a configured PIN or close code (decimal digits).
pub const PIN_LENGTH: usize = 4;

/// Keypad key that terminates PIN entry.
///
/// Keys typed before the sentinel are accumulated verbatim; the sentinel
/// itself is never part of the compared sequence.
pub const SENTINEL_KEY: char = '#';

// ============================================================================
// Alarm Defaults
// ============================================================================

/// Default absolute temperature ceiling (°C) for the absolute alarm policy.
pub const DEFAULT_TEMPERATURE_CEILING_C: f32 = 25.0;

/// Default absolute humidity ceiling (%RH) for the absolute alarm policy.
pub const DEFAULT_HUMIDITY_CEILING_PCT: f32 = 60.0;

/// Default temperature delta (°C) for the delta-from-baseline alarm policy.
pub const DEFAULT_TEMPERATURE_DELTA_C: f32 = 5.0;

/// Default humidity delta (%RH) for the delta-from-baseline alarm policy.
pub const DEFAULT_HUMIDITY_DELTA_PCT: f32 = 10.0;

/// Number of audible pulses replayed when the alarm trips.
pub const ALARM_PULSE_COUNT: u8 = 10;

/// Audible pulse on-time (milliseconds).
pub const ALARM_PULSE_ON_MS: u64 = 500;

/// Audible pulse off-time (milliseconds).
pub const ALARM_PULSE_OFF_MS: u64 = 500;

// ============================================================================
// Status Line Messages
// ============================================================================

/// Idle prompt shown while the vault is locked.
pub const MSG_PRESENT_CARD: &str = "Present card";

/// Prompt shown after a credential is granted, while a PIN is expected.
pub const MSG_ENTER_PIN: &str = "Enter PIN";

/// Shown when the vault unlocks.
pub const MSG_VAULT_OPEN: &str = "Vault open";

/// Shown when the vault re-locks after a close request.
pub const MSG_VAULT_SECURED: &str = "Vault secured";

/// Shown when a presented credential does not match.
pub const MSG_ACCESS_DENIED: &str = "Access denied";

/// Prefix for the alarm status line; trigger reasons are appended.
pub const MSG_ALARM_PREFIX: &str = "ALARM";
