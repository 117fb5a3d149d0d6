//! Vault configuration surface.
//!
//! All tunable behavior is collected in [`VaultConfig`], built through
//! [`VaultConfigBuilder`] which validates the combination at construction
//! time. Invalid configurations (a close code equal to the access PIN,
//! non-finite thresholds) are rejected here rather than guessed at runtime.

use crate::{
    Result,
    constants::{
        DEFAULT_CYCLE_MS, DEFAULT_HUMIDITY_CEILING_PCT, DEFAULT_KEY_DEBOUNCE_MS,
        DEFAULT_TEMPERATURE_CEILING_C,
    },
    error::Error,
    types::{CredentialId, PinCode},
};
use std::time::Duration;

/// Alarm evaluation policy.
///
/// The two surveyed alerting behaviors are configuration variants of the
/// same algorithm, selected here and never mixed:
///
/// - `Absolute` compares each channel against a fixed ceiling and triggers
///   on motion's rising edge only.
/// - `DeltaFromBaseline` compares each channel against the last accepted
///   reading and triggers while motion is high (level, not edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlarmPolicy {
    Absolute {
        temperature_ceiling_c: f32,
        humidity_ceiling_pct: f32,
    },
    DeltaFromBaseline {
        temperature_delta_c: f32,
        humidity_delta_pct: f32,
    },
}

impl AlarmPolicy {
    fn validate(&self) -> Result<()> {
        let (temp, hum, what) = match self {
            AlarmPolicy::Absolute {
                temperature_ceiling_c,
                humidity_ceiling_pct,
            } => (*temperature_ceiling_c, *humidity_ceiling_pct, "ceiling"),
            AlarmPolicy::DeltaFromBaseline {
                temperature_delta_c,
                humidity_delta_pct,
            } => (*temperature_delta_c, *humidity_delta_pct, "delta"),
        };
        if !temp.is_finite() {
            return Err(Error::Config(format!(
                "Temperature {what} must be finite"
            )));
        }
        if !hum.is_finite() {
            return Err(Error::Config(format!("Humidity {what} must be finite")));
        }
        if let AlarmPolicy::DeltaFromBaseline { .. } = self {
            if temp <= 0.0 || hum <= 0.0 {
                return Err(Error::Config(
                    "Alarm deltas must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for AlarmPolicy {
    fn default() -> Self {
        AlarmPolicy::Absolute {
            temperature_ceiling_c: DEFAULT_TEMPERATURE_CEILING_C,
            humidity_ceiling_pct: DEFAULT_HUMIDITY_CEILING_PCT,
        }
    }
}

/// How long a PIN entry may run before it is abandoned.
///
/// The surveyed devices block indefinitely until the sentinel key; a bounded
/// policy classifies an expired entry as a mismatch instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinTimeoutPolicy {
    /// Block until the sentinel key is read.
    #[default]
    Indefinite,

    /// Abandon the entry (as a mismatch) after this much time.
    After(Duration),
}

/// Validated configuration for one vault.
///
/// Construct through [`VaultConfig::builder`].
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// The single authorized card identifier.
    pub authorized_card: CredentialId,

    /// The 4-digit access PIN.
    pub access_pin: PinCode,

    /// Optional distinct code that re-locks the vault; must differ from the
    /// access PIN.
    pub close_code: Option<PinCode>,

    /// Alarm evaluation policy.
    pub alarm_policy: AlarmPolicy,

    /// Duration of one supervisor polling cycle.
    pub cycle: Duration,

    /// Pause between keypad polls during PIN entry.
    pub key_debounce: Duration,

    /// PIN entry abandonment policy.
    pub pin_timeout: PinTimeoutPolicy,
}

impl VaultConfig {
    /// Create a builder seeded with the mandatory credential pair.
    pub fn builder(authorized_card: CredentialId, access_pin: PinCode) -> VaultConfigBuilder {
        VaultConfigBuilder {
            authorized_card,
            access_pin,
            close_code: None,
            alarm_policy: AlarmPolicy::default(),
            cycle: Duration::from_millis(DEFAULT_CYCLE_MS),
            key_debounce: Duration::from_millis(DEFAULT_KEY_DEBOUNCE_MS),
            pin_timeout: PinTimeoutPolicy::default(),
        }
    }
}

/// Builder for [`VaultConfig`] with validation at `build()`.
///
/// # Examples
///
/// ```
/// use vaultguard_core::{AlarmPolicy, CredentialId, PinCode, VaultConfig};
///
/// let config = VaultConfig::builder(
///     CredentialId::parse("D3 1C D0 24").unwrap(),
///     PinCode::new("1234").unwrap(),
/// )
/// .with_close_code(PinCode::new("9999").unwrap())
/// .with_alarm_policy(AlarmPolicy::DeltaFromBaseline {
///     temperature_delta_c: 5.0,
///     humidity_delta_pct: 10.0,
/// })
/// .build()
/// .unwrap();
///
/// assert!(config.close_code.is_some());
/// ```
#[derive(Debug)]
pub struct VaultConfigBuilder {
    authorized_card: CredentialId,
    access_pin: PinCode,
    close_code: Option<PinCode>,
    alarm_policy: AlarmPolicy,
    cycle: Duration,
    key_debounce: Duration,
    pin_timeout: PinTimeoutPolicy,
}

impl VaultConfigBuilder {
    /// Set the distinct close code.
    pub fn with_close_code(mut self, code: PinCode) -> Self {
        self.close_code = Some(code);
        self
    }

    /// Set the alarm evaluation policy.
    pub fn with_alarm_policy(mut self, policy: AlarmPolicy) -> Self {
        self.alarm_policy = policy;
        self
    }

    /// Set the polling cycle duration.
    pub fn with_cycle(mut self, cycle: Duration) -> Self {
        self.cycle = cycle;
        self
    }

    /// Set the keypad debounce duration.
    pub fn with_key_debounce(mut self, debounce: Duration) -> Self {
        self.key_debounce = debounce;
        self
    }

    /// Set the PIN entry timeout policy.
    pub fn with_pin_timeout(mut self, policy: PinTimeoutPolicy) -> Self {
        self.pin_timeout = policy;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if:
    /// - The close code equals the access PIN (the close check would shadow
    ///   the match check and the entry becomes ambiguous)
    /// - An alarm threshold is non-finite, or a delta is not positive
    /// - The cycle or debounce duration is zero
    pub fn build(self) -> Result<VaultConfig> {
        if let Some(close) = &self.close_code {
            if *close == self.access_pin {
                return Err(Error::Config(
                    "Close code must differ from the access PIN".to_string(),
                ));
            }
        }
        self.alarm_policy.validate()?;
        if self.cycle.is_zero() {
            return Err(Error::Config("Cycle duration must be non-zero".to_string()));
        }
        if self.key_debounce.is_zero() {
            return Err(Error::Config(
                "Key debounce duration must be non-zero".to_string(),
            ));
        }

        Ok(VaultConfig {
            authorized_card: self.authorized_card,
            access_pin: self.access_pin,
            close_code: self.close_code,
            alarm_policy: self.alarm_policy,
            cycle: self.cycle,
            key_debounce: self.key_debounce,
            pin_timeout: self.pin_timeout,
        })
    }
}
