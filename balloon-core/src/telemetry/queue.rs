// telemetry/queue.rs
use crate::telemetry::link::LinkMonitor;
use crate::telemetry::types::{TelemetrySource, VelocitySample};
use crate::types::Timestamp;
use embassy_time::{Duration, Instant};
use heapless::Deque;

/// Order-preserving single-consumer buffer between packet ingestion and the
/// control loop.
///
/// Producers call `push` as packets arrive; the loop calls `refresh` once per
/// tick and then reads through `TelemetrySource`. When the buffer is full the
/// newest packet is rejected and counted, so arrival order is never broken.
pub struct QueuedSource<const N: usize> {
    pending: Deque<VelocitySample, N>,
    link: LinkMonitor,
    altitude: f32,
    elapsed: Timestamp,
    dropped: u32,
}

impl<const N: usize> QueuedSource<N> {
    pub const fn new(staleness_window: Duration) -> Self {
        Self {
            pending: Deque::new(),
            link: LinkMonitor::new(staleness_window),
            altitude: 0.0,
            elapsed: Timestamp::new(0, 0),
            dropped: 0,
        }
    }

    /// Queues a packet that arrived at `now`. Malformed packets still count
    /// as link activity.
    pub fn push(&mut self, sample: VelocitySample, now: Instant) -> Result<(), VelocitySample> {
        self.link.record_packet(now);
        if let Err(rejected) = self.pending.push_back(sample) {
            self.dropped = self.dropped.saturating_add(1);
            warn!("Telemetry queue full, dropped packet ({} total)", self.dropped);
            return Err(rejected);
        }
        Ok(())
    }

    /// Updates liveness for this tick.
    pub fn refresh(&mut self, now: Instant) -> bool {
        self.link.refresh(now)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> TelemetrySource for QueuedSource<N> {
    fn is_live(&self) -> bool {
        self.link.is_live()
    }

    fn has_new_sample(&self) -> bool {
        !self.pending.is_empty()
    }

    fn consume_sample(&mut self) -> Option<VelocitySample> {
        let sample = self.pending.pop_front()?;
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
