//! Mock actuator block for testing and development.

use crate::{Result, traits::VaultActuator, types::AlarmPulse};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use vaultguard_core::{AlarmState, LockPosition};

/// Recorded command history of the mock actuator block.
#[derive(Debug, Default)]
struct ActuatorLog {
    lock_commands: Vec<LockPosition>,
    alarm_commands: Vec<AlarmState>,
    pulses: Vec<AlarmPulse>,
    status_lines: Vec<String>,
}

/// Mock actuator block that records every command instead of driving
/// hardware.
///
/// The pulse pattern is recorded without sleeping so tests run at full
/// speed; a real driver would block for the duration of the pattern.
///
/// # Examples
///
/// ```
/// use vaultguard_hardware::mock::MockActuator;
/// use vaultguard_hardware::traits::VaultActuator;
/// use vaultguard_core::LockPosition;
///
/// #[tokio::main]
/// async fn main() -> vaultguard_hardware::Result<()> {
///     let (mut actuator, handle) = MockActuator::new();
///
///     actuator.set_lock(LockPosition::Open).await?;
///
///     assert_eq!(handle.lock_position().await, LockPosition::Open);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockActuator {
    log: Arc<Mutex<ActuatorLog>>,
}

impl MockActuator {
    /// Create a new mock actuator block.
    pub fn new() -> (Self, MockActuatorHandle) {
        let log = Arc::new(Mutex::new(ActuatorLog::default()));
        let actuator = Self {
            log: Arc::clone(&log),
        };
        let handle = MockActuatorHandle { log };
        (actuator, handle)
    }
}

impl Default for MockActuator {
    fn default() -> Self {
        Self::new().0
    }
}

impl VaultActuator for MockActuator {
    async fn set_lock(&mut self, position: LockPosition) -> Result<()> {
        self.log.lock().await.lock_commands.push(position);
        Ok(())
    }

    async fn set_alarm(&mut self, state: AlarmState) -> Result<()> {
        self.log.lock().await.alarm_commands.push(state);
        Ok(())
    }

    async fn pulse_alarm(&mut self, count: u8, on: Duration, off: Duration) -> Result<()> {
        self.log.lock().await.pulses.push(AlarmPulse { count, on, off });
        Ok(())
    }

    async fn write_status_line(&mut self, line: &str) -> Result<()> {
        self.log.lock().await.status_lines.push(line.to_string());
        Ok(())
    }
}

/// Handle for inspecting a mock actuator block's command history.
///
/// Can be cloned and held while the device end is owned by the supervisor.
#[derive(Debug, Clone)]
pub struct MockActuatorHandle {
    log: Arc<Mutex<ActuatorLog>>,
}

impl MockActuatorHandle {
    /// Last commanded lock position; fail-secure `Closed` before any
    /// command.
    pub async fn lock_position(&self) -> LockPosition {
        self.log
            .lock()
            .await
            .lock_commands
            .last()
            .copied()
            .unwrap_or(LockPosition::Closed)
    }

    /// Last commanded alarm state; `Off` before any command.
    pub async fn alarm_state(&self) -> AlarmState {
        self.log
            .lock()
            .await
            .alarm_commands
            .last()
            .copied()
            .unwrap_or(AlarmState::Off)
    }

    /// Full lock command history, oldest first.
    pub async fn lock_commands(&self) -> Vec<LockPosition> {
        self.log.lock().await.lock_commands.clone()
    }

    /// Full alarm command history, oldest first.
    pub async fn alarm_commands(&self) -> Vec<AlarmState> {
        self.log.lock().await.alarm_commands.clone()
    }

    /// Recorded pulse patterns, oldest first.
    pub async fn pulses(&self) -> Vec<AlarmPulse> {
        self.log.lock().await.pulses.clone()
    }

    /// Written status lines, oldest first.
    pub async fn status_lines(&self) -> Vec<String> {
        self.log.lock().await.status_lines.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fail_secure_defaults() {
        let (_actuator, handle) = MockActuator::new();

        assert_eq!(handle.lock_position().await, LockPosition::Closed);
        assert_eq!(handle.alarm_state().await, AlarmState::Off);
        assert!(handle.pulses().await.is_empty());
    }

    #[tokio::test]
    async fn test_commands_recorded_in_order() {
        let (mut actuator, handle) = MockActuator::new();

        actuator.set_lock(LockPosition::Open).await.unwrap();
        actuator.set_lock(LockPosition::Closed).await.unwrap();
        actuator.set_alarm(AlarmState::On).await.unwrap();

        assert_eq!(
            handle.lock_commands().await,
            vec![LockPosition::Open, LockPosition::Closed]
        );
        assert_eq!(handle.lock_position().await, LockPosition::Closed);
        assert_eq!(handle.alarm_state().await, AlarmState::On);
    }

    #[tokio::test]
    async fn test_pulse_recorded_without_blocking() {
        let (mut actuator, handle) = MockActuator::new();

        actuator
            .pulse_alarm(10, Duration::from_millis(500), Duration::from_millis(500))
            .await
            .unwrap();

        let pulses = handle.pulses().await;
        assert_eq!(pulses.len(), 1);
        assert_eq!(pulses[0].count, 10);
        assert_eq!(pulses[0].on, Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_status_lines() {
        let (mut actuator, handle) = MockActuator::new();

        actuator.write_status_line("Present card").await.unwrap();
        actuator.write_status_line("Enter PIN").await.unwrap();

        assert_eq!(
            handle.status_lines().await,
            vec!["Present card".to_string(), "Enter PIN".to_string()]
        );
    }
}
