//! Mock proximity-card reader for testing and development.

use crate::{
    Result,
    traits::CardReader,
    types::CardRead,
};
use tokio::sync::mpsc;

/// Mock card reader controlled through a channel.
///
/// A presented card sits in the channel until the control loop polls and
/// reads it, mirroring a card held in a real reader's field.
///
/// # Examples
///
/// ```
/// use vaultguard_hardware::mock::MockCardReader;
/// use vaultguard_hardware::traits::CardReader;
///
/// #[tokio::main]
/// async fn main() -> vaultguard_hardware::Result<()> {
///     let (mut reader, handle) = MockCardReader::new();
///
///     handle.present_card(vec![0xD3, 0x1C, 0xD0, 0x24]).await?;
///
///     assert!(reader.card_present().await?);
///     let card = reader.read_card().await?;
///     assert_eq!(card.uid_hex(), "D31CD024");
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockCardReader {
    /// Channel receiver for presented cards
    event_rx: mpsc::Receiver<CardRead>,

    /// Device name
    name: String,
}

impl MockCardReader {
    /// Create a new mock reader with the default name.
    pub fn new() -> (Self, MockCardReaderHandle) {
        Self::with_name("Mock Card Reader".to_string())
    }

    /// Create a new mock reader with a custom name.
    pub fn with_name(name: String) -> (Self, MockCardReaderHandle) {
        let (event_tx, event_rx) = mpsc::channel(32);

        let reader = Self {
            event_rx,
            name: name.clone(),
        };

        let handle = MockCardReaderHandle { event_tx, name };

        (reader, handle)
    }
}

impl Default for MockCardReader {
    fn default() -> Self {
        Self::new().0
    }
}

impl CardReader for MockCardReader {
    async fn card_present(&mut self) -> Result<bool> {
        Ok(!self.event_rx.is_empty())
    }

    async fn read_card(&mut self) -> Result<CardRead> {
        match self.event_rx.try_recv() {
            Ok(card) => Ok(card),
            Err(mpsc::error::TryRecvError::Empty) => {
                Err(crate::HardwareError::card_read("no card in field"))
            }
            Err(mpsc::error::TryRecvError::Disconnected) => Err(
                crate::HardwareError::disconnected(self.name.clone()),
            ),
        }
    }
}

/// Handle for controlling a mock card reader.
///
/// Can be cloned and shared across tasks.
#[derive(Debug, Clone)]
pub struct MockCardReaderHandle {
    /// Channel sender for presented cards
    event_tx: mpsc::Sender<CardRead>,

    /// Device name
    name: String,
}

impl MockCardReaderHandle {
    /// Present a card with the given UID bytes to the reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the UID length is invalid (4-10 bytes) or the
    /// reader has been dropped.
    pub async fn present_card(&self, uid: Vec<u8>) -> Result<()> {
        let card = CardRead::new(uid)?;
        self.event_tx
            .send(card)
            .await
            .map_err(|_| crate::HardwareError::disconnected(self.name.clone()))
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
