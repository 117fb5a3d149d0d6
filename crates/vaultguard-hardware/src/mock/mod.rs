//! Mock device implementations for testing and development.
//!
//! This module provides simulated device implementations that can be
//! controlled programmatically without requiring physical hardware. Each
//! mock is constructed as a `(device, handle)` pair: the device end
//! implements the port trait and is handed to the control core, the handle
//! end stays with the test or demo harness.

pub mod actuator;
pub mod card_reader;
pub mod keypad;
pub mod sensor;

// Re-export commonly used types
pub use actuator::{MockActuator, MockActuatorHandle};
pub use card_reader::{MockCardReader, MockCardReaderHandle};
pub use keypad::{MockKeypad, MockKeypadHandle};
pub use sensor::{EnvironmentLevels, MockEnvironment, MockEnvironmentHandle};
