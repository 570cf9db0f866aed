// Recording fakes for the hook and telemetry traits.
use crate::hooks::{Actuator, HookError, Hooks, Indicator, Notifier};
use crate::telemetry::{TelemetrySource, VelocitySample};
use crate::types::{Rgb, Timestamp};

#[derive(Default)]
pub struct RecordingNotifier {
    pub changes: Vec<String>,
    pub dumps: Vec<(VelocitySample, f32, Timestamp)>,
    pub fail: bool,
}

impl Notifier for RecordingNotifier {
    fn on_phase_changed(&mut self, description: &str) -> Result<(), HookError> {
        self.changes.push(description.to_string());
        if self.fail {
            return Err(HookError::Unavailable);
        }
        Ok(())
    }

    fn on_periodic_dump(
        &mut self,
        sample: &VelocitySample,
        altitude: f32,
        elapsed: Timestamp,
    ) -> Result<(), HookError> {
        self.dumps.push((*sample, altitude, elapsed));
        if self.fail {
            return Err(HookError::Busy);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingIndicator {
    pub colors: Vec<Rgb>,
}

impl RecordingIndicator {
    pub fn last(&self) -> Option<Rgb> {
        self.colors.last().copied()
    }
}

impl Indicator for RecordingIndicator {
    fn set_color(&mut self, color: Rgb) -> Result<(), HookError> {
        self.colors.push(color);
        Ok(())
    }
}

#[derive(Default)]
pub struct CountingActuator {
    pub triggers: u32,
}

impl Actuator for CountingActuator {
    fn on_altitude_threshold_crossed(&mut self) -> Result<(), HookError> {
        self.triggers += 1;
        Ok(())
    }
}

pub type RecordingHooks = Hooks<RecordingNotifier, RecordingIndicator, CountingActuator>;

pub fn recording_hooks() -> RecordingHooks {
    Hooks::new(
        RecordingNotifier::default(),
        RecordingIndicator::default(),
        CountingActuator::default(),
    )
}

/// Telemetry source driven directly by the test, one tick at a time.
pub struct ScriptedSource {
    pub live: bool,
    pub next: Option<VelocitySample>,
    pub altitude: f32,
    pub elapsed: Timestamp,
    ticks: u32,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            live: true,
            next: None,
            altitude: 0.0,
            elapsed: Timestamp::default(),
            ticks: 0,
        }
    }

    /// Queues a valid reading for the next tick at the given altitude.
    pub fn feed_at(&mut self, velocity_down: f32, altitude: f32) {
        self.ticks += 1;
        self.live = true;
        self.next = Some(VelocitySample::new(
            velocity_down,
            altitude,
            Timestamp::from_millis(self.ticks * 100),
        ));
    }

    pub fn feed(&mut self, velocity_down: f32) {
        self.feed_at(velocity_down, 1_000.0);
    }

    pub fn feed_invalid(&mut self) {
        self.ticks += 1;
        self.live = true;
        self.next = Some(VelocitySample::invalid(Timestamp::from_millis(self.ticks * 100)));
    }

    pub fn drop_link(&mut self) {
        self.live = false;
        self.next = None;
    }
}

impl TelemetrySource for ScriptedSource {
    fn is_live(&self) -> bool {
        self.live
    }

    fn has_new_sample(&self) -> bool {
        self.next.is_some()
    }

    fn consume_sample(&mut self) -> Option<VelocitySample> {
        let sample = self.next.take()?;
        if sample.valid {
            self.altitude = sample.altitude;
            self.elapsed = sample.elapsed;
        }
        Some(sample)
    }

    fn current_altitude(&self) -> f32 {
        self.altitude
    }

    fn elapsed_time(&self) -> Timestamp {
        self.elapsed
    }
}
