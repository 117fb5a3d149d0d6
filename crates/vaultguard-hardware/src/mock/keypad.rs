//! Mock keypad implementation for testing and development.

use crate::{
    Result,
    traits::{Key, Keypad},
};
use tokio::sync::mpsc;

/// Mock matrix keypad controlled through a channel.
///
/// Queued keys are drained one per `read_key` poll, mirroring a matrix scan
/// that reports at most one key per pass.
///
/// # Examples
///
/// ```
/// use vaultguard_hardware::mock::MockKeypad;
/// use vaultguard_hardware::traits::{Key, Keypad};
///
/// #[tokio::main]
/// async fn main() -> vaultguard_hardware::Result<()> {
///     let (mut keypad, handle) = MockKeypad::new();
///
///     handle.type_sequence("12#").await?;
///
///     assert_eq!(keypad.read_key().await?, Some(Key::Digit(1)));
///     assert_eq!(keypad.read_key().await?, Some(Key::Digit(2)));
///     assert_eq!(keypad.read_key().await?, Some(Key::Hash));
///     assert_eq!(keypad.read_key().await?, None);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockKeypad {
    /// Channel receiver for simulated key presses
    key_rx: mpsc::Receiver<Key>,

    /// Device name
    name: String,
}

impl MockKeypad {
    /// Create a new mock keypad with the default name.
    pub fn new() -> (Self, MockKeypadHandle) {
        Self::with_name("Mock Keypad".to_string())
    }

    /// Create a new mock keypad with a custom name.
    pub fn with_name(name: String) -> (Self, MockKeypadHandle) {
        let (key_tx, key_rx) = mpsc::channel(64);

        let keypad = Self {
            key_rx,
            name: name.clone(),
        };

        let handle = MockKeypadHandle { key_tx, name };

        (keypad, handle)
    }
}

impl Default for MockKeypad {
    fn default() -> Self {
        Self::new().0
    }
}

impl Keypad for MockKeypad {
    async fn read_key(&mut self) -> Result<Option<Key>> {
        match self.key_rx.try_recv() {
            Ok(key) => Ok(Some(key)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => {
                Err(crate::HardwareError::disconnected(self.name.clone()))
            }
        }
    }
}

/// Handle for controlling a mock keypad.
///
/// Can be cloned and shared across tasks.
#[derive(Debug, Clone)]
pub struct MockKeypadHandle {
    /// Channel sender for simulated key presses
    key_tx: mpsc::Sender<Key>,

    /// Device name
    name: String,
}

impl MockKeypadHandle {
    /// Queue one key press.
    ///
    /// # Errors
    ///
    /// Returns an error if the keypad has been dropped.
    pub async fn send_key(&self, key: Key) -> Result<()> {
        self.key_tx
            .send(key)
            .await
            .map_err(|_| crate::HardwareError::disconnected(self.name.clone()))
    }

    /// Queue one key press by its legend character.
    ///
    /// # Errors
    ///
    /// Returns an error if the character is not on the 4x4 legend or the
    /// keypad has been dropped.
    pub async fn press(&self, c: char) -> Result<()> {
        self.send_key(Key::from_char(c)?).await
    }

    /// Queue a sequence of key presses, e.g. `"1234#"`.
    ///
    /// This is the convenience method for scripting a full PIN entry.
    ///
    /// # Errors
    ///
    /// Returns an error if any character is not on the legend or the keypad
    /// has been dropped.
    pub async fn type_sequence(&self, sequence: &str) -> Result<()> {
        for c in sequence.chars() {
            self.press(c).await?;
        }
        Ok(())
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
