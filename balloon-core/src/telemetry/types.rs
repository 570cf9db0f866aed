// telemetry/types.rs
use crate::types::Timestamp;

/// One decoded velocity reading. Consumed once by the dispatcher and never
/// retained.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VelocitySample {
    /// Vertical velocity in m/s, positive when descending.
    pub velocity_down: f32,
    /// Altitude in metres.
    pub altitude: f32,
    pub elapsed: Timestamp,
    /// False when the packet failed validation upstream.
    pub valid: bool,
}

impl VelocitySample {
    pub const fn new(velocity_down: f32, altitude: f32, elapsed: Timestamp) -> Self {
        Self {
            velocity_down,
            altitude,
            elapsed,
            valid: true,
        }
    }

    /// Placeholder for a packet that arrived but could not be decoded.
    pub const fn invalid(elapsed: Timestamp) -> Self {
        Self {
            velocity_down: 0.0,
            altitude: 0.0,
            elapsed,
            valid: false,
        }
    }
}

/// Live telemetry feed as seen by the dispatcher.
pub trait TelemetrySource {
    /// False once no packet has arrived within the staleness window.
    fn is_live(&self) -> bool;

    fn has_new_sample(&self) -> bool;

    /// Takes the next sample. Returns `None` when nothing new has arrived
    /// since the last call.
    fn consume_sample(&mut self) -> Option<VelocitySample>;

    /// Altitude of the most recent valid sample.
    fn current_altitude(&self) -> f32;

    /// Mission time of the most recent sample.
    fn elapsed_time(&self) -> Timestamp;
}
