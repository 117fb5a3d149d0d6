//! Error types for hardware operations.
//!
//! This module defines error types specific to hardware device operations,
//! covering device disconnection, read failures, and invalid data. Whether a
//! given error is fatal is the caller's decision; the access controller, for
//! instance, treats a card read error as the normal "no card" outcome.

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur during hardware device operations.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Device is not connected or has been disconnected.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// Card reading error (no card in field, or bus read failed).
    #[error("Card read error: {message}")]
    CardReadError { message: String },

    /// Invalid data received from or destined for a device.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HardwareError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new card read error.
    pub fn card_read(message: impl Into<String>) -> Self {
        Self::CardReadError {
            message: message.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_error() {
        let error = HardwareError::disconnected("MFRC522");
        assert!(matches!(error, HardwareError::Disconnected { .. }));
        assert_eq!(error.to_string(), "Device disconnected: MFRC522");
    }

    #[test]
    fn test_card_read_error() {
        let error = HardwareError::card_read("no card in field");
        assert!(matches!(error, HardwareError::CardReadError { .. }));
        assert_eq!(error.to_string(), "Card read error: no card in field");
    }

    #[test]
    fn test_invalid_data_error() {
        let error = HardwareError::invalid_data("UID too short");
        assert!(matches!(error, HardwareError::InvalidData { .. }));
        assert_eq!(error.to_string(), "Invalid data: UID too short");
    }
}
