//! Hardware device abstraction layer for the Vaultguard enclosure.
//!
//! This crate provides trait-based abstractions for the peripherals of an
//! access-controlled vault: the proximity-card reader, the matrix keypad,
//! the ambient environment sensor block (temperature, humidity, motion), and
//! the actuator block (lock, alarm output, status display). The traits
//! enable substitution between mock implementations (for development and
//! testing) and real hardware drivers.
//!
//! # Design Philosophy
//!
//! - **Async-first**: All I/O operations are asynchronous using native
//!   `async fn` in traits (Rust 1.90 + Edition 2024 RPITIT).
//! - **Thread-safe**: All traits require `Send + Sync` for use with Tokio.
//! - **Error-aware**: All operations return `Result<T>` with detailed error
//!   information; the control layer decides which errors are normal polling
//!   outcomes (e.g. "no card in field").
//! - **Thin**: bus protocol decoding, matrix scanning, and character
//!   rendering belong to the driver behind the trait, never to the control
//!   logic in front of it.
//!
//! # Mock Implementations
//!
//! The [`mock`] module contains channel-driven implementations of every
//! trait, controllable from tests and the demo binary without physical
//! hardware:
//!
//! ```no_run
//! use vaultguard_hardware::mock::{MockCardReader, MockKeypad};
//! use vaultguard_hardware::traits::CardReader;
//!
//! # async fn example() -> vaultguard_hardware::Result<()> {
//! let (mut reader, reader_handle) = MockCardReader::new();
//! let (_keypad, keypad_handle) = MockKeypad::new();
//!
//! reader_handle.present_card(vec![0xD3, 0x1C, 0xD0, 0x24]).await?;
//! keypad_handle.type_sequence("1234#").await?;
//!
//! assert!(reader.card_present().await?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{HardwareError, Result};
pub use traits::{CardReader, EnvironmentSensor, Key, Keypad, VaultActuator};
pub use types::{AlarmPulse, CardRead};
