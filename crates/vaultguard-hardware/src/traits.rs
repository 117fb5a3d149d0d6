//! Hardware device trait definitions.
//!
//! These traits establish the contract between the vault control core and
//! its peripherals (card reader, keypad, environment sensors, actuators),
//! enabling substitution between mock and real hardware implementations.
//!
//! All traits use native `async fn` methods (Rust 1.90 + Edition 2024
//! RPITIT), eliminating the need for the `async_trait` macro. They are not
//! object-safe; use them through generic type parameters:
//!
//! ```no_run
//! use vaultguard_hardware::traits::{CardReader, Keypad};
//! use vaultguard_hardware::error::Result;
//!
//! async fn poll_card<R: CardReader>(reader: &mut R) -> Result<bool> {
//!     reader.card_present().await
//! }
//! ```

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::types::CardRead;
use std::time::Duration;
use vaultguard_core::{AlarmState, LockPosition};

/// One key from a 4x4 matrix keypad.
///
/// The `Hash` key is the sentinel that terminates PIN entry; everything
/// else is accumulated verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Numeric digit (0-9).
    Digit(u8),

    /// Letter key (A-D).
    Letter(char),

    /// Star key (*).
    Star,

    /// Hash/pound key (#); terminates PIN entry.
    Hash,
}

impl Key {
    /// Create a digit key.
    ///
    /// # Errors
    ///
    /// Returns an error if the digit is greater than 9.
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultguard_hardware::traits::Key;
    ///
    /// let key = Key::digit(5).unwrap();
    /// assert_eq!(key.to_char(), '5');
    ///
    /// assert!(Key::digit(10).is_err());
    /// ```
    pub fn digit(d: u8) -> Result<Self> {
        if d > 9 {
            return Err(crate::error::HardwareError::invalid_data(format!(
                "Digit must be 0-9, got {}",
                d
            )));
        }
        Ok(Self::Digit(d))
    }

    /// Create a letter key.
    ///
    /// # Errors
    ///
    /// Returns an error if the character is not A-D.
    pub fn letter(c: char) -> Result<Self> {
        if !('A'..='D').contains(&c) {
            return Err(crate::error::HardwareError::invalid_data(format!(
                "Letter key must be A-D, got '{}'",
                c
            )));
        }
        Ok(Self::Letter(c))
    }

    /// Map a keypad legend character to a key.
    ///
    /// # Errors
    ///
    /// Returns an error for characters outside the 4x4 legend
    /// (0-9, A-D, `*`, `#`).
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '0'..='9' => Ok(Self::Digit(c as u8 - b'0')),
            'A'..='D' => Ok(Self::Letter(c)),
            '*' => Ok(Self::Star),
            '#' => Ok(Self::Hash),
            _ => Err(crate::error::HardwareError::invalid_data(format!(
                "Unknown keypad character '{}'",
                c
            ))),
        }
    }

    /// The legend character for this key.
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Digit(d) => (b'0' + d) as char,
            Self::Letter(c) => c,
            Self::Star => '*',
            Self::Hash => '#',
        }
    }

    /// Returns `true` if this key terminates PIN entry.
    #[must_use]
    pub fn is_sentinel(self) -> bool {
        matches!(self, Self::Hash)
    }
}

/// Proximity-card reader abstraction.
///
/// Represents an RFID/NFC reader that can detect a card in its field and
/// read its UID. Bus-level protocol handling lives behind this trait.
pub trait CardReader: Send + Sync {
    /// Check if a card is currently present in the reader's field.
    ///
    /// Non-blocking; this is the per-cycle poll.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while checking for
    /// card presence.
    async fn card_present(&mut self) -> Result<bool>;

    /// Read the UID of the card in the field.
    ///
    /// # Errors
    ///
    /// Returns an error if no card is in the field or the read fails. The
    /// control layer treats both identically to "no card presented".
    async fn read_card(&mut self) -> Result<CardRead>;
}

/// Matrix keypad abstraction.
pub trait Keypad: Send + Sync {
    /// Poll for one key press.
    ///
    /// Returns `Ok(None)` when no key is pending; never blocks waiting for
    /// input. Debouncing across polls is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected or a communication
    /// error occurs.
    async fn read_key(&mut self) -> Result<Option<Key>>;
}

/// Ambient environment sensor block.
///
/// Faults on the analog channels are encoded in-band as NaN, matching the
/// behavior of DHT-class sensors; the monitor classifies and discards such
/// samples.
pub trait EnvironmentSensor: Send + Sync {
    /// Read the temperature in degrees Celsius. NaN encodes a fault.
    async fn read_temperature_c(&mut self) -> Result<f32>;

    /// Read the relative humidity in percent. NaN encodes a fault.
    async fn read_humidity_percent(&mut self) -> Result<f32>;

    /// Read the motion detector level.
    async fn read_motion(&mut self) -> Result<bool>;
}

/// Vault actuator block: lock, alarm output, status display.
///
/// Commands are fire-and-forget from the supervisor's perspective: errors
/// are surfaced but the control loop logs and continues.
pub trait VaultActuator: Send + Sync {
    /// Command the lock to a position.
    async fn set_lock(&mut self, position: LockPosition) -> Result<()>;

    /// Switch the alarm output on or off.
    async fn set_alarm(&mut self, state: AlarmState) -> Result<()>;

    /// Replay an audible pulse pattern on the alarm output.
    ///
    /// Blocks for the duration of the pattern on real hardware; the control
    /// loop deliberately pauses while it plays.
    async fn pulse_alarm(&mut self, count: u8, on: Duration, off: Duration) -> Result<()>;

    /// Write a line to the status display / operator log sink.
    async fn write_status_line(&mut self, line: &str) -> Result<()>;
}
