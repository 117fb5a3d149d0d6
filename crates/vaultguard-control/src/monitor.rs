//! Environment sampling and alarm evaluation.
//!
//! The [`EnvironmentMonitor`] owns the sensor block and the alarm policy
//! state: the delta policy's baseline and the absolute policy's previous
//! motion level. Evaluation is immediate: no averaging or hysteresis is
//! applied. A single out-of-range sample triggers, and the next in-range
//! sample clears.

use std::fmt;

use tracing::warn;

use vaultguard_core::{AlarmPolicy, Baseline, SensorReading, SensorSample};
use vaultguard_hardware::traits::EnvironmentSensor;

/// One cause of an alarm trigger.
///
/// Reported individually so concurrent causes stay visible to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    Temperature,
    Humidity,
    Motion,
}

impl fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerReason::Temperature => write!(f, "temperature"),
            TriggerReason::Humidity => write!(f, "humidity"),
            TriggerReason::Motion => write!(f, "motion"),
        }
    }
}

/// Decision produced by one alarm evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmDecision {
    /// At least one condition fired; all simultaneous reasons are listed.
    Trigger(Vec<TriggerReason>),

    /// Nothing fired (or triggering is suppressed by an access grant).
    NoTrigger,
}

impl AlarmDecision {
    /// Returns `true` if this decision fires the alarm.
    #[must_use]
    pub fn is_trigger(&self) -> bool {
        matches!(self, AlarmDecision::Trigger(_))
    }

    /// The trigger reasons, empty for `NoTrigger`.
    #[must_use]
    pub fn reasons(&self) -> &[TriggerReason] {
        match self {
            AlarmDecision::Trigger(reasons) => reasons,
            AlarmDecision::NoTrigger => &[],
        }
    }
}

/// Owns baseline sensor values and alarm-trigger decisions.
pub struct EnvironmentMonitor<S>
where
    S: EnvironmentSensor,
{
    sensor: S,
    policy: AlarmPolicy,

    /// Last accepted reading; seeded by the first valid sample under the
    /// delta policy. The absolute policy does not maintain a baseline.
    baseline: Option<Baseline>,

    /// Previous motion level, for the absolute policy's edge detection.
    previous_motion: bool,
}

impl<S> EnvironmentMonitor<S>
where
    S: EnvironmentSensor,
{
    /// Create a monitor over the given sensor block.
    pub fn new(sensor: S, policy: AlarmPolicy) -> Self {
        Self {
            sensor,
            policy,
            baseline: None,
            previous_motion: false,
        }
    }

    /// Read all channels once and classify the result.
    ///
    /// A NaN analog channel or a hardware error both classify as
    /// [`SensorSample::Fault`]; the cycle is logged and skipped by the
    /// caller. A fault never reaches [`evaluate`](Self::evaluate).
    pub async fn sample(&mut self) -> SensorSample {
        let temperature_c = match self.sensor.read_temperature_c().await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "temperature read failed");
                return SensorSample::Fault;
            }
        };
        let humidity_pct = match self.sensor.read_humidity_percent().await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "humidity read failed");
                return SensorSample::Fault;
            }
        };
        let motion = match self.sensor.read_motion().await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "motion read failed");
                return SensorSample::Fault;
            }
        };

        SensorSample::classify(SensorReading {
            temperature_c,
            humidity_pct,
            motion,
        })
    }

    /// Evaluate a valid reading under the configured policy.
    ///
    /// Policy state (baseline, previous motion level) updates on every call,
    /// including suppressed ones, so an open vault keeps tracking its
    /// environment. While `access_granted` is true the decision is always
    /// `NoTrigger`, whatever the reading says.
    pub fn evaluate(&mut self, reading: &SensorReading, access_granted: bool) -> AlarmDecision {
        let mut reasons = Vec::new();

        match self.policy {
            AlarmPolicy::Absolute {
                temperature_ceiling_c,
                humidity_ceiling_pct,
            } => {
                if reading.temperature_c > temperature_ceiling_c {
                    reasons.push(TriggerReason::Temperature);
                }
                if reading.humidity_pct > humidity_ceiling_pct {
                    reasons.push(TriggerReason::Humidity);
                }
                // Rising edge only: a level held high does not re-trigger
                if !self.previous_motion && reading.motion {
                    reasons.push(TriggerReason::Motion);
                }
                self.previous_motion = reading.motion;
            }
            AlarmPolicy::DeltaFromBaseline {
                temperature_delta_c,
                humidity_delta_pct,
            } => {
                if let Some(baseline) = self.baseline {
                    if (reading.temperature_c - baseline.temperature_c).abs() > temperature_delta_c
                    {
                        reasons.push(TriggerReason::Temperature);
                    }
                    if (reading.humidity_pct - baseline.humidity_pct).abs() > humidity_delta_pct {
                        reasons.push(TriggerReason::Humidity);
                    }
                }
                // Level-triggered under this policy
                if reading.motion {
                    reasons.push(TriggerReason::Motion);
                }
                // Unconditional replacement, trigger or not; the first valid
                // sample seeds the baseline instead of a 0.0/0.0 cold start
                self.baseline = Some(Baseline::from_reading(reading));
            }
        }

        if access_granted || reasons.is_empty() {
            AlarmDecision::NoTrigger
        } else {
            AlarmDecision::Trigger(reasons)
        }
    }

    /// Current baseline, if one has been established.
    #[must_use]
    pub fn baseline(&self) -> Option<Baseline> {
        self.baseline
    }
}
