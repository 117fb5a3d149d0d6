//! Credential authentication and PIN entry.
//!
//! The [`AccessController`] owns the card reader and keypad and reduces
//! their input to three-valued authentication outcomes. All of its failure
//! modes are normal polling outcomes: a read error is "no card", an expired
//! or garbled PIN entry is a mismatch. It never commands actuators; the
//! supervisor acts on the returned outcomes.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use vaultguard_core::{CredentialId, PinCode, PinTimeoutPolicy, VaultConfig};
use vaultguard_hardware::traits::{CardReader, Key, Keypad};

/// Outcome of one authentication poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A card was presented and matches the authorized identifier.
    Granted,

    /// A card was presented and does not match.
    Denied,

    /// No card presented this cycle (or the read failed); the normal idle
    /// outcome, not an error.
    NoCredential,
}

/// Outcome of one completed PIN entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOutcome {
    /// Entered sequence equals the access PIN.
    Matched,

    /// Entered sequence equals neither code (or the entry timed out).
    Mismatch,

    /// Access grant active and the entered sequence equals the close code.
    /// Takes precedence over `Matched`.
    CloseRequested,
}

/// Owns authentication state and the grant/deny decision.
pub struct AccessController<R, K>
where
    R: CardReader,
    K: Keypad,
{
    reader: R,
    keypad: K,
    authorized: CredentialId,
    access_pin: PinCode,
    close_code: Option<PinCode>,
    key_debounce: Duration,
    pin_timeout: PinTimeoutPolicy,
}

impl<R, K> AccessController<R, K>
where
    R: CardReader,
    K: Keypad,
{
    /// Create a controller over the given devices with the configured
    /// credentials.
    pub fn new(reader: R, keypad: K, config: &VaultConfig) -> Self {
        Self {
            reader,
            keypad,
            authorized: config.authorized_card.clone(),
            access_pin: config.access_pin.clone(),
            close_code: config.close_code.clone(),
            key_debounce: config.key_debounce,
            pin_timeout: config.pin_timeout,
        }
    }

    /// Poll for a presented card and compare it against the authorized
    /// identifier.
    ///
    /// A presence-check or read failure is treated identically to "no card":
    /// the reader reporting nothing is the normal state of the world, not an
    /// error. Comparison is exact (and constant-time) on the formatted
    /// uppercase hex form.
    pub async fn try_authenticate(&mut self) -> AuthOutcome {
        match self.reader.card_present().await {
            Ok(true) => {}
            Ok(false) => return AuthOutcome::NoCredential,
            Err(e) => {
                debug!(error = %e, "card presence check failed");
                return AuthOutcome::NoCredential;
            }
        }

        let card = match self.reader.read_card().await {
            Ok(card) => card,
            Err(e) => {
                debug!(error = %e, "card read failed");
                return AuthOutcome::NoCredential;
            }
        };

        let presented = match CredentialId::from_bytes(&card.uid) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "presented card UID malformed");
                return AuthOutcome::Denied;
            }
        };

        if presented == self.authorized {
            AuthOutcome::Granted
        } else {
            debug!(presented = %presented, "credential mismatch");
            AuthOutcome::Denied
        }
    }

    /// Accumulate keypad keys until the sentinel and classify the sequence.
    ///
    /// Keys other than the sentinel are appended in the order typed; there
    /// is no backspace or edit support and no length validation before
    /// comparison. The loop pauses for the configured debounce between
    /// polls and, under a bounded timeout policy, abandons an expired entry
    /// as a mismatch.
    pub async fn read_pin(&mut self, access_granted: bool) -> PinOutcome {
        self.read_pin_seeded(None, access_granted).await
    }

    /// Non-blocking PIN entry point used while the vault is open.
    ///
    /// Returns `None` when no key is pending, without consuming time. If a
    /// key is pending, the entry runs to the sentinel as usual.
    pub async fn try_read_pin(&mut self, access_granted: bool) -> Option<PinOutcome> {
        match self.keypad.read_key().await {
            Ok(Some(key)) => Some(self.read_pin_seeded(Some(key), access_granted).await),
            Ok(None) => None,
            Err(e) => {
                debug!(error = %e, "keypad poll failed");
                None
            }
        }
    }

    async fn read_pin_seeded(&mut self, seed: Option<Key>, access_granted: bool) -> PinOutcome {
        let mut entered = String::new();

        if let Some(key) = seed {
            if key.is_sentinel() {
                return self.classify(&entered, access_granted);
            }
            entered.push(key.to_char());
        }

        let deadline = match self.pin_timeout {
            PinTimeoutPolicy::Indefinite => None,
            PinTimeoutPolicy::After(limit) => Some(Instant::now() + limit),
        };

        loop {
            match self.keypad.read_key().await {
                Ok(Some(key)) if key.is_sentinel() => break,
                Ok(Some(key)) => entered.push(key.to_char()),
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "keypad read failed during PIN entry");
                    return PinOutcome::Mismatch;
                }
            }

            if deadline.is_some_and(|d| Instant::now() >= d) {
                debug!("PIN entry timed out before sentinel");
                return PinOutcome::Mismatch;
            }

            tokio::time::sleep(self.key_debounce).await;
        }

        self.classify(&entered, access_granted)
    }

    fn classify(&self, entered: &str, access_granted: bool) -> PinOutcome {
        if access_granted
            && self
                .close_code
                .as_ref()
                .is_some_and(|code| code.matches(entered))
        {
            return PinOutcome::CloseRequested;
        }
        if self.access_pin.matches(entered) {
            PinOutcome::Matched
        } else {
            PinOutcome::Mismatch
        }
    }
}
