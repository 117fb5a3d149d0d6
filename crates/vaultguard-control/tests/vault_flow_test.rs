//! Integration tests for the end-to-end vault control flow.
//!
//! These tests drive a fully wired supervisor through the mock devices:
//! credential presentation, PIN entry, environment excursions, alarm
//! round-trips, and external disarm. Each `tick` is stepped manually so
//! every assertion observes a precise point in the cycle sequence.

use std::time::Duration;

use vaultguard_control::VaultSupervisor;
use vaultguard_core::{
    AlarmPolicy, AlarmState, CredentialId, LockPosition, PinCode, VaultConfig, VaultState,
};
use vaultguard_hardware::mock::{
    EnvironmentLevels, MockActuator, MockActuatorHandle, MockCardReader, MockCardReaderHandle,
    MockEnvironment, MockEnvironmentHandle, MockKeypad, MockKeypadHandle,
};

const AUTHORIZED_UID: [u8; 4] = [0xD3, 0x1C, 0xD0, 0x24];

struct Handles {
    reader: MockCardReaderHandle,
    keypad: MockKeypadHandle,
    sensor: MockEnvironmentHandle,
    actuator: MockActuatorHandle,
}

type MockSupervisor = VaultSupervisor<MockCardReader, MockKeypad, MockEnvironment, MockActuator>;

fn build_vault(policy: AlarmPolicy) -> (MockSupervisor, Handles) {
    let config = VaultConfig::builder(
        CredentialId::parse("D3 1C D0 24").unwrap(),
        PinCode::new("1234").unwrap(),
    )
    .with_close_code(PinCode::new("9999").unwrap())
    .with_alarm_policy(policy)
    .with_key_debounce(Duration::from_millis(1))
    .build()
    .unwrap();

    let (reader, reader_handle) = MockCardReader::new();
    let (keypad, keypad_handle) = MockKeypad::new();
    let (sensor, sensor_handle) = MockEnvironment::new();
    let (actuator, actuator_handle) = MockActuator::new();

    let supervisor = VaultSupervisor::new(&config, reader, keypad, sensor, actuator);

    (
        supervisor,
        Handles {
            reader: reader_handle,
            keypad: keypad_handle,
            sensor: sensor_handle,
            actuator: actuator_handle,
        },
    )
}

fn absolute_policy() -> AlarmPolicy {
    AlarmPolicy::Absolute {
        temperature_ceiling_c: 25.0,
        humidity_ceiling_pct: 60.0,
    }
}

fn delta_policy() -> AlarmPolicy {
    AlarmPolicy::DeltaFromBaseline {
        temperature_delta_c: 5.0,
        humidity_delta_pct: 10.0,
    }
}

/// Drive the vault from Locked to Unlocked with the authorized credentials.
async fn unlock(supervisor: &mut MockSupervisor, handles: &Handles) {
    handles
        .reader
        .present_card(AUTHORIZED_UID.to_vec())
        .await
        .unwrap();
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::AwaitingPin);

    handles.keypad.type_sequence("1234#").await.unwrap();
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::Unlocked);
}

// ============================================================================
// Access Flow
// ============================================================================

#[tokio::test]
async fn test_scenario_a_card_then_pin_unlocks() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    unlock(&mut supervisor, &handles).await;

    assert!(supervisor.access_granted());
    assert_eq!(handles.actuator.lock_position().await, LockPosition::Open);
}

#[tokio::test]
async fn test_scenario_b_close_code_relocks() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    unlock(&mut supervisor, &handles).await;

    handles.keypad.type_sequence("9999#").await.unwrap();
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Locked);
    assert!(!supervisor.access_granted());
    assert_eq!(handles.actuator.lock_position().await, LockPosition::Closed);
}

#[tokio::test]
async fn test_close_round_trip_commands_closed_exactly_once() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    unlock(&mut supervisor, &handles).await;
    let closed_before = closed_count(&handles).await;

    handles.keypad.type_sequence("9999#").await.unwrap();
    supervisor.tick().await.unwrap();
    assert_eq!(closed_count(&handles).await, closed_before + 1);

    // Re-issuing the close sequence while already Locked is a no-op: the
    // keys are not consumed as a PIN and no further command is issued.
    handles.keypad.type_sequence("9999#").await.unwrap();
    supervisor.tick().await.unwrap();
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Locked);
    assert_eq!(closed_count(&handles).await, closed_before + 1);
}

async fn closed_count(handles: &Handles) -> usize {
    handles
        .actuator
        .lock_commands()
        .await
        .iter()
        .filter(|p| **p == LockPosition::Closed)
        .count()
}

#[tokio::test]
async fn test_denied_card_stays_locked() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    handles
        .reader
        .present_card(vec![0xAA, 0xBB, 0xCC, 0xDD])
        .await
        .unwrap();
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Locked);
    assert_eq!(handles.actuator.lock_position().await, LockPosition::Closed);
    assert!(
        handles
            .actuator
            .status_lines()
            .await
            .contains(&"Access denied".to_string())
    );
}

#[tokio::test]
async fn test_pin_mismatch_returns_to_locked_without_actuation() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    handles
        .reader
        .present_card(AUTHORIZED_UID.to_vec())
        .await
        .unwrap();
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::AwaitingPin);

    let commands_before = handles.actuator.lock_commands().await.len();

    handles.keypad.type_sequence("1111#").await.unwrap();
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Locked);
    assert!(!supervisor.access_granted());
    // The lock never moved for the failed attempt
    assert_eq!(handles.actuator.lock_commands().await.len(), commands_before);
}

#[tokio::test]
async fn test_wrong_pin_then_retry_with_new_card() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    handles
        .reader
        .present_card(AUTHORIZED_UID.to_vec())
        .await
        .unwrap();
    supervisor.tick().await.unwrap();
    handles.keypad.type_sequence("0000#").await.unwrap();
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::Locked);

    // A fresh presentation starts a fresh session
    unlock(&mut supervisor, &handles).await;
    assert!(supervisor.access_granted());
}

// ============================================================================
// Environment Monitoring
// ============================================================================

#[tokio::test]
async fn test_idle_in_range_samples_never_leave_locked() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    for _ in 0..10 {
        supervisor.tick().await.unwrap();
        assert_eq!(supervisor.state(), VaultState::Locked);
    }
    assert_eq!(handles.actuator.alarm_state().await, AlarmState::Off);
}

#[tokio::test]
async fn test_scenario_c_motion_edge_trips_alarm() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    // Establish the LOW level first
    supervisor.tick().await.unwrap();

    handles.sensor.set_motion(true);
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Alarmed);
    assert_eq!(handles.actuator.alarm_state().await, AlarmState::On);
    assert_eq!(handles.actuator.lock_position().await, LockPosition::Closed);

    // The audible pattern replayed once on entry
    let pulses = handles.actuator.pulses().await;
    assert_eq!(pulses.len(), 1);
    assert_eq!(pulses[0].count, 10);
    assert_eq!(pulses[0].on, Duration::from_millis(500));
    assert_eq!(pulses[0].off, Duration::from_millis(500));
}

#[tokio::test]
async fn test_scenario_d_alarm_clears_when_back_in_range() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    supervisor.tick().await.unwrap();
    handles.sensor.set_motion(true);
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::Alarmed);

    handles.sensor.set_motion(false);
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Locked);
    assert_eq!(handles.actuator.alarm_state().await, AlarmState::Off);
}

#[tokio::test]
async fn test_temperature_ceiling_trips_alarm() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    handles.sensor.set_temperature(30.0);
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Alarmed);
    let lines = handles.actuator.status_lines().await;
    assert!(lines.iter().any(|l| l == "ALARM: temperature"));
}

#[tokio::test]
async fn test_concurrent_reasons_all_reported() {
    let (mut supervisor, handles) = build_vault(delta_policy());
    supervisor.initialize().await;

    // Seed the baseline with one quiet cycle
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::Locked);

    handles.sensor.set_levels(EnvironmentLevels {
        temperature_c: 30.0,
        humidity_pct: 55.0,
        motion: true,
    });
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Alarmed);
    let lines = handles.actuator.status_lines().await;
    assert!(
        lines
            .iter()
            .any(|l| l == "ALARM: temperature, humidity, motion"),
        "expected combined alarm line, got {lines:?}"
    );
}

#[tokio::test]
async fn test_delta_policy_first_sample_does_not_false_alarm() {
    let (mut supervisor, handles) = build_vault(delta_policy());
    supervisor.initialize().await;

    // A warm, humid environment on cold start: with the seeded baseline
    // this must not trip
    handles.sensor.set_levels(EnvironmentLevels {
        temperature_c: 35.0,
        humidity_pct: 75.0,
        motion: false,
    });
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Locked);
}

#[tokio::test]
async fn test_sensor_fault_skips_cycle_and_preserves_baseline() {
    let (mut supervisor, handles) = build_vault(delta_policy());
    supervisor.initialize().await;

    // Baseline at ambient 21.0 / 40.0
    supervisor.tick().await.unwrap();

    handles.sensor.set_fault();
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::Locked);

    // Recovery beyond the delta relative to the *pre-fault* baseline: the
    // fault must not have replaced it
    handles.sensor.set_levels(EnvironmentLevels {
        temperature_c: 27.5,
        humidity_pct: 40.0,
        motion: false,
    });
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Alarmed);
}

#[tokio::test]
async fn test_fault_while_alarmed_does_not_change_state() {
    let (mut supervisor, handles) = build_vault(delta_policy());
    supervisor.initialize().await;

    supervisor.tick().await.unwrap();
    handles.sensor.set_motion(true);
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::Alarmed);

    handles.sensor.set_fault();
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Alarmed);
    assert_eq!(handles.actuator.alarm_state().await, AlarmState::On);
}

// ============================================================================
// Suppression
// ============================================================================

#[tokio::test]
async fn test_extreme_environment_suppressed_while_unlocked() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    unlock(&mut supervisor, &handles).await;

    handles.sensor.set_levels(EnvironmentLevels {
        temperature_c: 90.0,
        humidity_pct: 99.0,
        motion: true,
    });
    for _ in 0..5 {
        supervisor.tick().await.unwrap();
        assert_eq!(supervisor.state(), VaultState::Unlocked);
    }
    assert_eq!(handles.actuator.alarm_state().await, AlarmState::Off);
    assert!(handles.actuator.pulses().await.is_empty());
}

#[tokio::test]
async fn test_delta_policy_suppressed_while_unlocked() {
    let (mut supervisor, handles) = build_vault(delta_policy());
    supervisor.initialize().await;

    unlock(&mut supervisor, &handles).await;

    handles.sensor.set_levels(EnvironmentLevels {
        temperature_c: 50.0,
        humidity_pct: 90.0,
        motion: true,
    });
    for _ in 0..3 {
        supervisor.tick().await.unwrap();
    }
    assert_eq!(supervisor.state(), VaultState::Unlocked);
}

// ============================================================================
// Disarm
// ============================================================================

#[tokio::test]
async fn test_disarm_forces_alarmed_to_locked() {
    let (mut supervisor, handles) = build_vault(delta_policy());
    supervisor.initialize().await;

    // Level-triggered motion keeps the alarm condition alive
    supervisor.tick().await.unwrap();
    handles.sensor.set_motion(true);
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::Alarmed);

    // Without disarm the state persists
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::Alarmed);

    supervisor.request_disarm();
    supervisor.tick().await.unwrap();

    assert_eq!(supervisor.state(), VaultState::Locked);
    assert_eq!(handles.actuator.alarm_state().await, AlarmState::Off);
}

#[tokio::test]
async fn test_stale_disarm_does_not_clear_later_alarm() {
    let (mut supervisor, handles) = build_vault(delta_policy());
    supervisor.initialize().await;

    // Disarm requested while Locked is consumed and discarded
    supervisor.request_disarm();
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::Locked);

    handles.sensor.set_motion(true);
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::Alarmed);

    // The earlier request must not fire now
    supervisor.tick().await.unwrap();
    assert_eq!(supervisor.state(), VaultState::Alarmed);
}

// ============================================================================
// State History
// ============================================================================

#[tokio::test]
async fn test_full_session_history_recorded() {
    let (mut supervisor, handles) = build_vault(absolute_policy());
    supervisor.initialize().await;

    unlock(&mut supervisor, &handles).await;
    handles.keypad.type_sequence("9999#").await.unwrap();
    supervisor.tick().await.unwrap();

    let history: Vec<_> = supervisor
        .machine()
        .history()
        .iter()
        .map(|t| (t.from, t.to))
        .collect();
    assert_eq!(
        history,
        vec![
            (VaultState::Locked, VaultState::AwaitingPin),
            (VaultState::AwaitingPin, VaultState::Unlocked),
            (VaultState::Unlocked, VaultState::Locked),
        ]
    );
}
