//! Mock environment sensor block for testing and development.

use crate::{Result, traits::EnvironmentSensor};
use tokio::sync::watch;

/// Current levels reported by the mock sensor block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentLevels {
    /// Temperature in degrees Celsius; NaN simulates a DHT read fault.
    pub temperature_c: f32,

    /// Relative humidity in percent; NaN simulates a DHT read fault.
    pub humidity_pct: f32,

    /// Motion detector level.
    pub motion: bool,
}

impl Default for EnvironmentLevels {
    fn default() -> Self {
        // Quiet room ambient
        Self {
            temperature_c: 21.0,
            humidity_pct: 40.0,
            motion: false,
        }
    }
}

/// Mock environment sensor controlled through a watch channel.
///
/// Unlike the event-driven card reader and keypad mocks, sensors are
/// level-driven: every read observes the most recently set levels, however
/// often the control loop polls.
///
/// # Examples
///
/// ```
/// use vaultguard_hardware::mock::MockEnvironment;
/// use vaultguard_hardware::traits::EnvironmentSensor;
///
/// #[tokio::main]
/// async fn main() -> vaultguard_hardware::Result<()> {
///     let (mut sensor, handle) = MockEnvironment::new();
///
///     handle.set_temperature(28.5);
///     handle.set_motion(true);
///
///     assert_eq!(sensor.read_temperature_c().await?, 28.5);
///     assert!(sensor.read_motion().await?);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockEnvironment {
    /// Channel receiver observing the current levels
    levels_rx: watch::Receiver<EnvironmentLevels>,
}

impl MockEnvironment {
    /// Create a new mock sensor block at default ambient levels.
    pub fn new() -> (Self, MockEnvironmentHandle) {
        Self::with_levels(EnvironmentLevels::default())
    }

    /// Create a new mock sensor block at the given levels.
    pub fn with_levels(levels: EnvironmentLevels) -> (Self, MockEnvironmentHandle) {
        let (levels_tx, levels_rx) = watch::channel(levels);

        let sensor = Self { levels_rx };
        let handle = MockEnvironmentHandle { levels_tx };

        (sensor, handle)
    }
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new().0
    }
}

impl EnvironmentSensor for MockEnvironment {
    async fn read_temperature_c(&mut self) -> Result<f32> {
        Ok(self.levels_rx.borrow().temperature_c)
    }

    async fn read_humidity_percent(&mut self) -> Result<f32> {
        Ok(self.levels_rx.borrow().humidity_pct)
    }

    async fn read_motion(&mut self) -> Result<bool> {
        Ok(self.levels_rx.borrow().motion)
    }
}

/// Handle for controlling a mock environment sensor block.
///
/// Setters are infallible: levels are retained even while no reader is
/// polling.
#[derive(Debug)]
pub struct MockEnvironmentHandle {
    /// Channel sender holding the current levels
    levels_tx: watch::Sender<EnvironmentLevels>,
}

impl MockEnvironmentHandle {
    /// Replace all levels at once.
    pub fn set_levels(&self, levels: EnvironmentLevels) {
        self.levels_tx.send_replace(levels);
    }

    /// Set the temperature channel.
    pub fn set_temperature(&self, temperature_c: f32) {
        self.levels_tx
            .send_modify(|levels| levels.temperature_c = temperature_c);
    }

    /// Set the humidity channel.
    pub fn set_humidity(&self, humidity_pct: f32) {
        self.levels_tx
            .send_modify(|levels| levels.humidity_pct = humidity_pct);
    }

    /// Set the motion detector level.
    pub fn set_motion(&self, motion: bool) {
        self.levels_tx.send_modify(|levels| levels.motion = motion);
    }

    /// Simulate a sensor fault: both analog channels read NaN.
    ///
    /// The motion level is unaffected, matching a DHT failure with a healthy
    /// PIR detector.
    pub fn set_fault(&self) {
        self.levels_tx.send_modify(|levels| {
            levels.temperature_c = f32::NAN;
            levels.humidity_pct = f32::NAN;
        });
    }

    /// Current levels (for test assertions).
    pub fn levels(&self) -> EnvironmentLevels {
        *self.levels_tx.borrow()
    }
}
