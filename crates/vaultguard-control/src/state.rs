//! Vault state machine.
//!
//! Wraps [`VaultState`] with transition validation, entry timestamps, and a
//! bounded transition history for diagnostics. The valid transition set
//! lives on the state enum itself (`VaultState::can_transition_to`); this
//! type enforces it and records what happened.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use vaultguard_core::{Error, Result, VaultState};

/// Maximum number of state transitions to keep in history.
///
/// A complete access session is four transitions and an alarm round-trip is
/// two, so 100 entries cover dozens of recent sessions without unbounded
/// growth.
const MAX_HISTORY_SIZE: usize = 100;

/// A single recorded state transition.
///
/// # Serialization Note
///
/// The `timestamp` field is not serialized as `Instant` is process-specific.
/// When deserializing, the timestamp is set to the time of deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state transitioned from.
    pub from: VaultState,

    /// The state transitioned to.
    pub to: VaultState,

    /// When the transition occurred.
    #[serde(skip, default = "Instant::now")]
    pub timestamp: Instant,
}

impl StateTransition {
    /// Create a new transition record with the current timestamp.
    pub fn new(from: VaultState, to: VaultState) -> Self {
        Self {
            from,
            to,
            timestamp: Instant::now(),
        }
    }

    /// Time elapsed since this transition occurred.
    pub fn elapsed(&self) -> Duration {
        self.timestamp.elapsed()
    }
}

/// State machine enforcing valid vault state flow.
///
/// Not thread-safe: it is owned by the single supervisor control task and
/// never shared.
///
/// # Examples
///
/// ```
/// use vaultguard_control::VaultStateMachine;
/// use vaultguard_core::VaultState;
///
/// let mut machine = VaultStateMachine::new();
/// assert_eq!(machine.state(), VaultState::Locked);
///
/// machine.transition_to(VaultState::AwaitingPin).unwrap();
/// assert!(machine.transition_to(VaultState::Alarmed).is_err());
/// ```
pub struct VaultStateMachine {
    /// Current authoritative state.
    current_state: VaultState,

    /// When the current state was entered.
    state_entered_at: Instant,

    /// History of state transitions (limited to MAX_HISTORY_SIZE).
    history: VecDeque<StateTransition>,
}

impl VaultStateMachine {
    /// Create a machine in the initial `Locked` state.
    pub fn new() -> Self {
        Self {
            current_state: VaultState::Locked,
            state_entered_at: Instant::now(),
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// The current state.
    pub fn state(&self) -> VaultState {
        self.current_state
    }

    /// Time elapsed in the current state.
    pub fn time_in_current_state(&self) -> Duration {
        self.state_entered_at.elapsed()
    }

    /// The recorded transition history, oldest first.
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.history
    }

    /// The most recent `count` transitions, oldest first.
    pub fn last_transitions(&self, count: usize) -> Vec<StateTransition> {
        self.history
            .iter()
            .rev()
            .take(count)
            .rev()
            .cloned()
            .collect()
    }

    /// Transition to a new state, validating the transition.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` if the requested transition
    /// is not in the valid set; the current state is left unchanged. An
    /// invalid transition reaching this point is a supervisor bug, not a
    /// runtime condition.
    pub fn transition_to(&mut self, new_state: VaultState) -> Result<StateTransition> {
        if !self.current_state.can_transition_to(&new_state) {
            return Err(Error::InvalidStateTransition {
                from: self.current_state.to_string(),
                to: new_state.to_string(),
            });
        }

        let transition = StateTransition::new(self.current_state, new_state);

        self.current_state = new_state;
        self.state_entered_at = Instant::now();
        self.add_to_history(transition.clone());

        Ok(transition)
    }

    fn add_to_history(&mut self, transition: StateTransition) {
        self.history.push_back(transition);
        if self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
    }
}

impl Default for VaultStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
