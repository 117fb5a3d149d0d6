//! Vaultguard demo binary.
//!
//! Wires the mock devices to a supervisor and scripts a complete session:
//! a denied card, a granted unlock, a close, and an alarm round-trip. The
//! status display is echoed through tracing so the whole flow is visible on
//! the console. Run with `RUST_LOG=debug` for per-cycle detail.

use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vaultguard_control::VaultSupervisor;
use vaultguard_core::{AlarmPolicy, CredentialId, PinCode, PinTimeoutPolicy, VaultConfig};
use vaultguard_hardware::mock::{MockActuator, MockCardReader, MockEnvironment, MockKeypad};

const AUTHORIZED_UID: [u8; 4] = [0xD3, 0x1C, 0xD0, 0x24];
const UNKNOWN_UID: [u8; 4] = [0xAA, 0xBB, 0xCC, 0xDD];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = VaultConfig::builder(
        CredentialId::parse("D3 1C D0 24")?,
        PinCode::new("1234")?,
    )
    .with_close_code(PinCode::new("9999")?)
    .with_alarm_policy(AlarmPolicy::Absolute {
        temperature_ceiling_c: 25.0,
        humidity_ceiling_pct: 60.0,
    })
    .with_cycle(Duration::from_millis(50))
    .with_key_debounce(Duration::from_millis(5))
    .with_pin_timeout(PinTimeoutPolicy::After(Duration::from_secs(10)))
    .build()?;

    let (reader, reader_handle) = MockCardReader::new();
    let (keypad, keypad_handle) = MockKeypad::new();
    let (sensor, sensor_handle) = MockEnvironment::new();
    let (actuator, actuator_handle) = MockActuator::new();

    let mut vault = VaultSupervisor::new(&config, reader, keypad, sensor, actuator);
    vault.initialize().await;

    info!(state = %vault.state(), "vault initialized");

    // An unknown card bounces off
    reader_handle.present_card(UNKNOWN_UID.to_vec()).await?;
    vault.tick().await?;
    info!(state = %vault.state(), "after unknown card");

    // The authorized card plus PIN opens the vault
    reader_handle.present_card(AUTHORIZED_UID.to_vec()).await?;
    vault.tick().await?;
    keypad_handle.type_sequence("1234#").await?;
    vault.tick().await?;
    info!(state = %vault.state(), granted = vault.access_granted(), "after unlock");

    // The environment can rage while the grant is active
    sensor_handle.set_motion(true);
    vault.tick().await?;
    info!(state = %vault.state(), "motion while open (suppressed)");
    sensor_handle.set_motion(false);

    // Close code secures the vault again
    keypad_handle.type_sequence("9999#").await?;
    vault.tick().await?;
    info!(state = %vault.state(), "after close code");

    // Now the same motion trips the alarm
    vault.tick().await?;
    sensor_handle.set_motion(true);
    vault.tick().await?;
    info!(state = %vault.state(), "after motion without access");

    // And clears on the next quiet sample
    sensor_handle.set_motion(false);
    vault.tick().await?;
    info!(state = %vault.state(), "after quiet sample");

    for line in actuator_handle.status_lines().await {
        info!(display = %line, "status line");
    }
    for transition in vault.machine().last_transitions(16) {
        info!(from = %transition.from, to = %transition.to, "transition");
    }

    Ok(())
}
