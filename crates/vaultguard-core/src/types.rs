use crate::{
    Result,
    constants::{MAX_UID_LENGTH, MIN_UID_LENGTH, PIN_LENGTH},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Identifier of an authorized proximity card.
///
/// The canonical form is the UID bytes rendered as uppercase hexadecimal
/// pairs separated by single spaces, e.g. `"D3 1C D0 24"`. Comparison is
/// exact on that form: case- and spacing-sensitive, no prefix or fuzzy
/// matching.
///
/// # Security
/// This type implements constant-time comparison to prevent timing attacks
/// when matching a scanned card against the configured identifier.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct CredentialId(String);

impl CredentialId {
    /// Build a credential identifier from raw card UID bytes.
    ///
    /// This is the explicit formatter used for every scanned card: each byte
    /// becomes two uppercase hex characters, bytes joined by single spaces.
    ///
    /// # Errors
    /// Returns `Error::InvalidCredentialFormat` if the UID length is outside
    /// the ISO 14443 range of 4-10 bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultguard_core::CredentialId;
    ///
    /// let id = CredentialId::from_bytes(&[0xD3, 0x1C, 0xD0, 0x24]).unwrap();
    /// assert_eq!(id.as_str(), "D3 1C D0 24");
    /// ```
    pub fn from_bytes(uid: &[u8]) -> Result<Self> {
        if !(MIN_UID_LENGTH..=MAX_UID_LENGTH).contains(&uid.len()) {
            return Err(Error::InvalidCredentialFormat(format!(
                "Card UID must be {MIN_UID_LENGTH}-{MAX_UID_LENGTH} bytes, got {}",
                uid.len()
            )));
        }
        let formatted = uid
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        Ok(CredentialId(formatted))
    }

    /// Parse a credential identifier from its textual form.
    ///
    /// The input is normalized (trimmed, uppercased, whitespace collapsed to
    /// single spaces) before validation, so `" d3 1c d0 24 "` parses to the
    /// same identifier as `"D3 1C D0 24"`.
    ///
    /// # Errors
    /// Returns `Error::InvalidCredentialFormat` if any group is not exactly
    /// two hex digits, or if the byte count is outside 4-10.
    pub fn parse(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase();
        let pairs: Vec<&str> = normalized.split_whitespace().collect();

        if !(MIN_UID_LENGTH..=MAX_UID_LENGTH).contains(&pairs.len()) {
            return Err(Error::InvalidCredentialFormat(format!(
                "Credential must contain {MIN_UID_LENGTH}-{MAX_UID_LENGTH} byte pairs, got {}",
                pairs.len()
            )));
        }

        for pair in &pairs {
            if pair.len() != 2 || !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(Error::InvalidCredentialFormat(format!(
                    "Invalid byte pair '{pair}'"
                )));
            }
        }

        Ok(CredentialId(pairs.join(" ")))
    }

    /// Get the canonical textual form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CredentialId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CredentialId::parse(s)
    }
}

/// Constant-time comparison implementation for CredentialId
///
/// This prevents timing attacks by ensuring comparison takes the same time
/// regardless of where the strings differ.
impl PartialEq for CredentialId {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl std::hash::Hash for CredentialId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// A configured 4-digit access or close code.
///
/// Only the configured side is length-validated; sequences typed on the
/// keypad are compared as-is and simply fail equality unless they match the
/// stored code exactly.
///
/// # Security
/// Comparison against entered sequences is constant-time, and the digits are
/// redacted from `Debug` output so codes never leak into logs.
#[derive(Clone, Eq, Serialize, Deserialize)]
pub struct PinCode(String);

impl PinCode {
    /// Create a PIN code, validating it is exactly four decimal digits.
    ///
    /// # Errors
    /// Returns `Error::InvalidPinFormat` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultguard_core::PinCode;
    ///
    /// let pin = PinCode::new("1234").unwrap();
    /// assert!(pin.matches("1234"));
    /// assert!(!pin.matches("12345"));
    /// assert!(PinCode::new("12a4").is_err());
    /// ```
    pub fn new(code: &str) -> Result<Self> {
        if code.len() != PIN_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidPinFormat(format!(
                "PIN must be exactly {PIN_LENGTH} decimal digits"
            )));
        }
        Ok(PinCode(code.to_string()))
    }

    /// Compare an entered key sequence against this code in constant time.
    ///
    /// No length normalization is applied: a sequence of any other length is
    /// simply not equal.
    #[must_use]
    pub fn matches(&self, entered: &str) -> bool {
        self.0.as_bytes().ct_eq(entered.as_bytes()).into()
    }
}

impl PartialEq for PinCode {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl fmt::Debug for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PinCode(****)")
    }
}

impl std::str::FromStr for PinCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PinCode::new(s)
    }
}

/// Commanded position of the vault lock actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockPosition {
    Open,
    Closed,
}

impl fmt::Display for LockPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LockPosition::Open => write!(f, "Open"),
            LockPosition::Closed => write!(f, "Closed"),
        }
    }
}

/// Commanded state of the alarm output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmState {
    On,
    Off,
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlarmState::On => write!(f, "On"),
            AlarmState::Off => write!(f, "Off"),
        }
    }
}

/// Authoritative state of the vault, owned by the supervisor.
///
/// The lock actuator position is a pure function of this state, see
/// [`lock_position`](VaultState::lock_position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaultState {
    /// Locked and monitoring; waiting for a credential.
    Locked,

    /// Credential granted; waiting for the PIN entry to complete.
    AwaitingPin,

    /// Open under verified authorization; alarm triggers suppressed.
    Unlocked,

    /// Alarm tripped; lock forced closed, alarm output on.
    Alarmed,
}

impl VaultState {
    /// Check if a transition to the target state is valid from this state.
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultguard_core::VaultState;
    ///
    /// assert!(VaultState::Locked.can_transition_to(&VaultState::AwaitingPin));
    /// assert!(!VaultState::Locked.can_transition_to(&VaultState::Unlocked));
    /// ```
    #[must_use]
    pub fn can_transition_to(&self, target: &VaultState) -> bool {
        matches!(
            (self, target),
            // From Locked: credential granted, or a sensor trigger
            (VaultState::Locked, VaultState::AwaitingPin | VaultState::Alarmed)
            // From AwaitingPin: PIN matched, or mismatch falls back
            | (VaultState::AwaitingPin, VaultState::Unlocked | VaultState::Locked)
            // From Unlocked: close code entered
            | (VaultState::Unlocked, VaultState::Locked)
            // From Alarmed: condition cleared or external disarm
            | (VaultState::Alarmed, VaultState::Locked)
        )
    }

    /// The lock position this state requires.
    ///
    /// Only `Unlocked` opens the lock; every other state keeps or forces it
    /// closed.
    #[must_use]
    pub fn lock_position(&self) -> LockPosition {
        match self {
            VaultState::Unlocked => LockPosition::Open,
            _ => LockPosition::Closed,
        }
    }

    /// Returns `true` iff this state carries a legitimate access grant.
    #[must_use]
    pub fn grants_access(&self) -> bool {
        matches!(self, VaultState::Unlocked)
    }
}

impl fmt::Display for VaultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            VaultState::Locked => "Locked",
            VaultState::AwaitingPin => "AwaitingPin",
            VaultState::Unlocked => "Unlocked",
            VaultState::Alarmed => "Alarmed",
        };
        write!(f, "{}", state_str)
    }
}

/// One environment sensor reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Temperature in degrees Celsius. NaN encodes a device fault.
    pub temperature_c: f32,

    /// Relative humidity in percent. NaN encodes a device fault.
    pub humidity_pct: f32,

    /// Motion detector level, `true` = presence detected.
    pub motion: bool,
}

impl SensorReading {
    /// Returns `true` if either analog channel reported not-a-number.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        self.temperature_c.is_nan() || self.humidity_pct.is_nan()
    }
}

/// Outcome of one sampling pass over the sensor port.
///
/// A `Fault` sample is logged and discarded: it never reaches evaluation,
/// never updates the baseline, and never changes vault state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorSample {
    Valid(SensorReading),
    Fault,
}

impl SensorSample {
    /// Classify a raw reading, turning NaN channels into a fault.
    #[must_use]
    pub fn classify(reading: SensorReading) -> Self {
        if reading.is_fault() {
            SensorSample::Fault
        } else {
            SensorSample::Valid(reading)
        }
    }
}

/// Last accepted temperature/humidity pair, reference point for the
/// delta-from-baseline alarm policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl Baseline {
    /// Capture a baseline from a valid reading.
    #[must_use]
    pub fn from_reading(reading: &SensorReading) -> Self {
        Baseline {
            temperature_c: reading.temperature_c,
            humidity_pct: reading.humidity_pct,
        }
    }
}
