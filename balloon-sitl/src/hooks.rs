use balloon_core::log::{DumpRecord, LogBuffer, MAX_LOG_LINE_LEN};
use balloon_core::{
    Actuator, HookError, Indicator, Notifier, Rgb, Timestamp, VelocitySample, info,
};
use std::io::Write;

/// Prints phase changes and periodic dumps to stdout as CSV rows.
pub struct ConsoleNotifier<W: Write> {
    out: W,
    line: LogBuffer<MAX_LOG_LINE_LEN>,
    clock: Timestamp,
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line: LogBuffer::new(),
            clock: Timestamp::default(),
        }
    }

    /// Mission time stamped on phase change rows.
    pub fn set_clock(&mut self, clock: Timestamp) {
        self.clock = clock;
    }

    pub fn write_raw(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn flush_line(&mut self) -> Result<(), HookError> {
        self.out
            .write_all(self.line.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|_| HookError::Unavailable)
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn on_phase_changed(&mut self, description: &str) -> Result<(), HookError> {
        self.line.reset();
        self.line
            .write_record(self.clock, &description)
            .map_err(|_| HookError::Failed)?;
        self.flush_line()
    }

    fn on_periodic_dump(
        &mut self,
        sample: &VelocitySample,
        altitude: f32,
        elapsed: Timestamp,
    ) -> Result<(), HookError> {
        let record = DumpRecord::new(sample, altitude, elapsed);
        self.line.reset();
        self.line
            .write_record(record.elapsed, &record)
            .map_err(|_| HookError::Failed)?;
        self.flush_line()
    }
}

/// Stands in for the addressable LED: logs colour changes.
#[derive(Default)]
pub struct LoggingIndicator {
    current: Option<Rgb>,
}

impl Indicator for LoggingIndicator {
    fn set_color(&mut self, color: Rgb) -> Result<(), HookError> {
        if self.current != Some(color) {
            info!(
                "Indicator -> #{:02x}{:02x}{:02x}",
                color.r, color.g, color.b
            );
            self.current = Some(color);
        }
        Ok(())
    }
}

/// Stands in for the camera stepper and shutter.
#[derive(Default)]
pub struct CameraLog {
    frames: u32,
}

impl CameraLog {
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl Actuator for CameraLog {
    fn on_altitude_threshold_crossed(&mut self) -> Result<(), HookError> {
        self.frames += 1;
        info!("Camera: advance and trigger, frame {}", self.frames);
        Ok(())
    }
}
