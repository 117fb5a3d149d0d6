//! Common types shared across hardware device implementations.

use crate::error::Result;
use vaultguard_core::constants::{MAX_UID_LENGTH, MIN_UID_LENGTH};

/// A card read event from the proximity reader.
///
/// Carries the raw UID bytes exactly as scanned plus the read timestamp.
/// Formatting and comparison against the authorized identifier happen in the
/// control layer, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRead {
    /// Card unique identifier (4-10 bytes per ISO 14443).
    pub uid: Vec<u8>,

    /// Timestamp when the card was read.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl CardRead {
    /// Create a card read event with the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID length is not within the valid range of
    /// 4-10 bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultguard_hardware::types::CardRead;
    ///
    /// let read = CardRead::new(vec![0xD3, 0x1C, 0xD0, 0x24]).unwrap();
    /// assert_eq!(read.uid.len(), 4);
    ///
    /// assert!(CardRead::new(vec![0x01]).is_err());
    /// ```
    pub fn new(uid: Vec<u8>) -> Result<Self> {
        if !(MIN_UID_LENGTH..=MAX_UID_LENGTH).contains(&uid.len()) {
            return Err(crate::HardwareError::invalid_data(format!(
                "Card UID length must be between {} and {} bytes, got {}",
                MIN_UID_LENGTH,
                MAX_UID_LENGTH,
                uid.len()
            )));
        }
        Ok(CardRead {
            uid,
            timestamp: chrono::Utc::now(),
        })
    }

    /// Get the UID as a contiguous hexadecimal string (diagnostics).
    pub fn uid_hex(&self) -> String {
        self.uid
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join("")
    }
}

/// One replayed audible alarm pulse pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmPulse {
    /// Number of on/off repetitions.
    pub count: u8,

    /// Buzzer on-time per pulse.
    pub on: std::time::Duration,

    /// Buzzer off-time per pulse.
    pub off: std::time::Duration,
}
