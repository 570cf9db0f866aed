// Side-effect collaborators driven by the dispatcher.
use crate::telemetry::VelocitySample;
use crate::types::{Rgb, Timestamp};
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

/// Failure reported by a side-effect hook. The dispatcher logs and counts
/// these; it never retries or propagates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HookError {
    Busy,
    Unavailable,
    Failed,
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookError::Busy => f.write_str("hook busy"),
            HookError::Unavailable => f.write_str("hook unavailable"),
            HookError::Failed => f.write_str("hook failed"),
        }
    }
}

impl core::error::Error for HookError {}

/// Pull-before-flight safety pin.
pub trait SafetyInterlock {
    /// True once the interlock has been removed.
    fn is_armed(&self) -> bool;
}

impl SafetyInterlock for bool {
    fn is_armed(&self) -> bool {
        *self
    }
}

// Lets an interrupt handler own the pin state while the loop reads it.
impl SafetyInterlock for AtomicBool {
    fn is_armed(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: SafetyInterlock + ?Sized> SafetyInterlock for &T {
    fn is_armed(&self) -> bool {
        (**self).is_armed()
    }
}

/// Operator-facing reporting sink.
pub trait Notifier {
    fn on_phase_changed(&mut self, description: &str) -> Result<(), HookError>;

    fn on_periodic_dump(
        &mut self,
        sample: &VelocitySample,
        altitude: f32,
        elapsed: Timestamp,
    ) -> Result<(), HookError>;
}

/// Status light.
pub trait Indicator {
    fn set_color(&mut self, color: Rgb) -> Result<(), HookError>;
}

/// Camera advance/trigger collaborator.
pub trait Actuator {
    fn on_altitude_threshold_crossed(&mut self) -> Result<(), HookError>;
}

/// The set of hooks a dispatcher tick drives.
pub struct Hooks<N, I, A> {
    pub notifier: N,
    pub indicator: I,
    pub actuator: A,
}

impl<N: Notifier, I: Indicator, A: Actuator> Hooks<N, I, A> {
    pub const fn new(notifier: N, indicator: I, actuator: A) -> Self {
        Self {
            notifier,
            indicator,
            actuator,
        }
    }
}
