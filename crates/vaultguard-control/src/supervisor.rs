//! Top-level vault supervision loop.
//!
//! [`VaultSupervisor`] composes the access controller and the environment
//! monitor, owns the authoritative state machine and the access-grant flag,
//! and is the only component that commands the actuator block. One call to
//! [`tick`](VaultSupervisor::tick) is one polling cycle: at most one
//! authentication attempt, then (if not mid-authentication) at most one
//! environment evaluation, never both interleaved.
//!
//! Actuator commands are fire-and-forget: failures are logged and the loop
//! continues. No tick outcome is fatal; [`run`](VaultSupervisor::run) never
//! halts on its own.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use vaultguard_core::{
    AlarmState, Result, SensorReading, SensorSample, VaultConfig, VaultState,
    constants::{
        ALARM_PULSE_COUNT, ALARM_PULSE_OFF_MS, ALARM_PULSE_ON_MS, MSG_ACCESS_DENIED,
        MSG_ALARM_PREFIX, MSG_ENTER_PIN, MSG_PRESENT_CARD, MSG_VAULT_OPEN, MSG_VAULT_SECURED,
    },
};
use vaultguard_hardware::traits::{CardReader, EnvironmentSensor, Keypad, VaultActuator};

use crate::access::{AccessController, AuthOutcome, PinOutcome};
use crate::monitor::{AlarmDecision, EnvironmentMonitor};
use crate::state::VaultStateMachine;

/// Arbitrates between access control and environment monitoring, owning the
/// unified lock/alarm state.
pub struct VaultSupervisor<R, K, S, A>
where
    R: CardReader,
    K: Keypad,
    S: EnvironmentSensor,
    A: VaultActuator,
{
    access: AccessController<R, K>,
    monitor: EnvironmentMonitor<S>,
    actuator: A,
    machine: VaultStateMachine,

    /// Legitimate access in effect; true iff the state is `Unlocked`.
    access_granted: bool,

    /// Buffered external disarm request, consumed once per tick.
    disarm_requested: bool,

    /// Inter-cycle pacing for `run`.
    cycle: Duration,
}

impl<R, K, S, A> VaultSupervisor<R, K, S, A>
where
    R: CardReader,
    K: Keypad,
    S: EnvironmentSensor,
    A: VaultActuator,
{
    /// Wire a supervisor over the given devices.
    pub fn new(config: &VaultConfig, reader: R, keypad: K, sensor: S, actuator: A) -> Self {
        Self {
            access: AccessController::new(reader, keypad, config),
            monitor: EnvironmentMonitor::new(sensor, config.alarm_policy),
            actuator,
            machine: VaultStateMachine::new(),
            access_granted: false,
            disarm_requested: false,
            cycle: config.cycle,
        }
    }

    /// Drive the actuators to the initial locked posture.
    ///
    /// Call once before the first tick; mirrors the power-on sequence of the
    /// physical device (lock closed, alarm silent, idle prompt shown).
    pub async fn initialize(&mut self) {
        self.actuator
            .set_lock(VaultState::Locked.lock_position())
            .await
            .ok();
        self.actuator.set_alarm(AlarmState::Off).await.ok();
        self.actuator.write_status_line(MSG_PRESENT_CARD).await.ok();
    }

    /// Current authoritative vault state.
    pub fn state(&self) -> VaultState {
        self.machine.state()
    }

    /// Whether a legitimate access grant is in effect.
    pub fn access_granted(&self) -> bool {
        self.access_granted
    }

    /// The underlying state machine (transition history, timing).
    pub fn machine(&self) -> &VaultStateMachine {
        &self.machine
    }

    /// Request an external disarm (e.g. from a remote control).
    ///
    /// The request is buffered and consumed by the next tick; while Alarmed
    /// it forces the transition back to Locked independent of sensor state.
    /// In any other state it is discarded.
    pub fn request_disarm(&mut self) {
        self.disarm_requested = true;
    }

    /// Run one polling cycle.
    ///
    /// # Errors
    ///
    /// Only an invalid internal state transition (a supervisor bug) is
    /// returned as an error; every device-level failure is absorbed within
    /// the cycle per the local-handling policy.
    pub async fn tick(&mut self) -> Result<()> {
        debug_assert_eq!(
            self.access_granted,
            self.machine.state().grants_access(),
            "access grant out of sync with state"
        );

        // The disarm flag is consumed exactly once per tick so a stale
        // request cannot fire on a later alarm.
        let disarm = std::mem::take(&mut self.disarm_requested);

        match self.machine.state() {
            VaultState::Locked => match self.access.try_authenticate().await {
                AuthOutcome::Granted => {
                    self.machine.transition_to(VaultState::AwaitingPin)?;
                    info!("credential granted, awaiting PIN");
                    self.actuator.write_status_line(MSG_ENTER_PIN).await.ok();
                }
                AuthOutcome::Denied => {
                    info!("credential denied");
                    self.actuator
                        .write_status_line(MSG_ACCESS_DENIED)
                        .await
                        .ok();
                    self.monitor_cycle().await?;
                }
                AuthOutcome::NoCredential => {
                    self.monitor_cycle().await?;
                }
            },

            VaultState::AwaitingPin => match self.access.read_pin(self.access_granted).await {
                PinOutcome::Matched => {
                    self.machine.transition_to(VaultState::Unlocked)?;
                    self.access_granted = true;
                    self.actuator
                        .set_lock(VaultState::Unlocked.lock_position())
                        .await
                        .ok();
                    info!("PIN matched, vault unlocked");
                    self.actuator.write_status_line(MSG_VAULT_OPEN).await.ok();
                }
                // No grant is active here, so CloseRequested cannot be
                // produced; it classifies with any other non-match.
                PinOutcome::Mismatch | PinOutcome::CloseRequested => {
                    self.machine.transition_to(VaultState::Locked)?;
                    // No actuator change: the lock never opened
                    info!("PIN mismatch, vault stays locked");
                }
            },

            VaultState::Unlocked => match self.access.try_read_pin(self.access_granted).await {
                Some(PinOutcome::CloseRequested) => {
                    self.machine.transition_to(VaultState::Locked)?;
                    self.access_granted = false;
                    self.actuator
                        .set_lock(VaultState::Locked.lock_position())
                        .await
                        .ok();
                    info!("close code entered, vault secured");
                    self.actuator
                        .write_status_line(MSG_VAULT_SECURED)
                        .await
                        .ok();
                }
                Some(outcome) => {
                    debug!(?outcome, "keypad entry ignored while open");
                }
                None => {
                    // Sampling continues for display/logging; triggers are
                    // suppressed by the active grant inside the monitor
                    self.monitor_cycle().await?;
                }
            },

            VaultState::Alarmed => {
                if disarm {
                    self.machine.transition_to(VaultState::Locked)?;
                    self.actuator.set_alarm(AlarmState::Off).await.ok();
                    info!("alarm disarmed externally");
                    self.actuator.write_status_line(MSG_PRESENT_CARD).await.ok();
                    return Ok(());
                }

                match self.monitor.sample().await {
                    SensorSample::Fault => {
                        // A fault can coexist with any state but never
                        // changes it
                        warn!("sensor fault while alarmed, skipping cycle");
                    }
                    SensorSample::Valid(reading) => {
                        match self.monitor.evaluate(&reading, self.access_granted) {
                            AlarmDecision::Trigger(reasons) => {
                                debug!(?reasons, "alarm condition persists");
                            }
                            AlarmDecision::NoTrigger => {
                                self.machine.transition_to(VaultState::Locked)?;
                                self.actuator.set_alarm(AlarmState::Off).await.ok();
                                info!("alarm condition cleared");
                                self.actuator
                                    .write_status_line(MSG_PRESENT_CARD)
                                    .await
                                    .ok();
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Run the polling loop indefinitely.
    ///
    /// Tick errors are logged and the loop continues; there is no fatal
    /// path out of supervision.
    pub async fn run(&mut self) {
        loop {
            if let Err(e) = self.tick().await {
                error!(error = %e, "supervision cycle failed");
            }
            tokio::time::sleep(self.cycle).await;
        }
    }

    /// One environment evaluation: sample, display, decide.
    async fn monitor_cycle(&mut self) -> Result<()> {
        let reading = match self.monitor.sample().await {
            SensorSample::Fault => {
                // Behave as if no sample were taken this cycle
                warn!("sensor fault, skipping cycle");
                return Ok(());
            }
            SensorSample::Valid(reading) => reading,
        };

        self.write_environment_line(&reading).await;

        match self.monitor.evaluate(&reading, self.access_granted) {
            AlarmDecision::NoTrigger => Ok(()),
            AlarmDecision::Trigger(reasons) => {
                self.machine.transition_to(VaultState::Alarmed)?;

                for reason in &reasons {
                    warn!(%reason, "alarm condition detected without legitimate access");
                }

                self.actuator.set_alarm(AlarmState::On).await.ok();
                self.actuator
                    .set_lock(VaultState::Alarmed.lock_position())
                    .await
                    .ok();
                self.actuator
                    .pulse_alarm(
                        ALARM_PULSE_COUNT,
                        Duration::from_millis(ALARM_PULSE_ON_MS),
                        Duration::from_millis(ALARM_PULSE_OFF_MS),
                    )
                    .await
                    .ok();

                let reason_list = reasons
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                self.actuator
                    .write_status_line(&format!("{MSG_ALARM_PREFIX}: {reason_list}"))
                    .await
                    .ok();

                Ok(())
            }
        }
    }

    async fn write_environment_line(&mut self, reading: &SensorReading) {
        self.actuator
            .write_status_line(&format!(
                "T {:.1}C  H {:.1}%",
                reading.temperature_c, reading.humidity_pct
            ))
            .await
            .ok();
    }
}
