use crate::types::Rgb;
use core::fmt;
use embassy_time::Duration;

/// Downward velocity (m/s) below which the payload is climbing.
pub const RISE_THRESHOLD: f32 = -2.0;

/// Nominal upper edge of the floating band (m/s).
/// Not used by the classifier: the Floating/Descending boundary is
/// `DESCEND_THRESHOLD`.
pub const FLOAT_THRESHOLD: f32 = 2.0;

/// Downward velocity (m/s) at or above which the payload is descending.
pub const DESCEND_THRESHOLD: f32 = 5.0;

/// Every Nth consumed packet is reported as a diagnostic dump.
pub const DUMP_EVERY_N_PACKETS: u32 = 10;

/// Altitude (m) above which dump ticks also fire the camera actuator.
pub const ALTITUDE_TRIGGER: f32 = 15_000.0;

/// Indicator colour while the telemetry stream is down.
pub const IDLE_COLOR: Rgb = Rgb::new(16, 16, 16);

/// Indicator brightness applied to phase colours (0-255).
pub const INDICATOR_BRIGHTNESS: u8 = 64;

/// Time without a packet after which the stream is considered stale.
pub const STALENESS_WINDOW_MS: u64 = 5_000;

/// Tunables for the phase controller. Missing fields fall back to the
/// compile-time defaults above.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    pub rise_threshold: f32,
    pub float_threshold: f32,
    pub descend_threshold: f32,
    pub dump_every_n_packets: u32,
    pub idle_color: Rgb,
    pub indicator_brightness: u8,
    pub altitude_trigger: f32,
    pub staleness_window_ms: u64,
}

impl PhaseConfig {
    pub const fn new() -> Self {
        Self {
            rise_threshold: RISE_THRESHOLD,
            float_threshold: FLOAT_THRESHOLD,
            descend_threshold: DESCEND_THRESHOLD,
            dump_every_n_packets: DUMP_EVERY_N_PACKETS,
            idle_color: IDLE_COLOR,
            indicator_brightness: INDICATOR_BRIGHTNESS,
            altitude_trigger: ALTITUDE_TRIGGER,
            staleness_window_ms: STALENESS_WINDOW_MS,
        }
    }

    pub const fn staleness_window(&self) -> Duration {
        Duration::from_millis(self.staleness_window_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rise_threshold.is_finite()
            || !self.descend_threshold.is_finite()
            || !self.altitude_trigger.is_finite()
        {
            return Err(ConfigError::NonFiniteThreshold);
        }
        if self.rise_threshold >= self.descend_threshold {
            return Err(ConfigError::InvertedThresholds);
        }
        if self.dump_every_n_packets == 0 {
            return Err(ConfigError::ZeroDumpInterval);
        }
        if self.staleness_window_ms == 0 {
            return Err(ConfigError::ZeroStalenessWindow);
        }
        Ok(())
    }
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    NonFiniteThreshold,
    InvertedThresholds,
    ZeroDumpInterval,
    ZeroStalenessWindow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFiniteThreshold => f.write_str("thresholds must be finite"),
            ConfigError::InvertedThresholds => {
                f.write_str("rise_threshold must be below descend_threshold")
            }
            ConfigError::ZeroDumpInterval => f.write_str("dump_every_n_packets must be non-zero"),
            ConfigError::ZeroStalenessWindow => {
                f.write_str("staleness_window_ms must be non-zero")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PhaseConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.rise_threshold, -2.0);
        assert_eq!(config.descend_threshold, 5.0);
        assert_eq!(config.staleness_window(), Duration::from_millis(5_000));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = PhaseConfig {
            rise_threshold: 6.0,
            ..PhaseConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvertedThresholds));
    }

    #[test]
    fn test_zero_dump_interval_rejected() {
        let config = PhaseConfig {
            dump_every_n_packets: 0,
            ..PhaseConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDumpInterval));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = PhaseConfig {
            descend_threshold: f32::NAN,
            ..PhaseConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonFiniteThreshold));
    }
}
