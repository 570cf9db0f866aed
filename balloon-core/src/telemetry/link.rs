// telemetry/link.rs
use embassy_time::{Duration, Instant};

/// Tracks packet arrivals and decides whether the telemetry stream is live.
///
/// The monitor never reads a clock itself; callers pass `now` so the same
/// logic runs against the hardware timer, a simulation clock, or a test.
#[derive(Debug, Clone, Copy)]
pub struct LinkMonitor {
    window: Duration,
    last_packet: Option<Instant>,
    live: bool,
}

impl LinkMonitor {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_packet: None,
            live: false,
        }
    }

    pub fn record_packet(&mut self, now: Instant) {
        self.last_packet = Some(now);
        self.live = true;
    }

    /// Re-evaluates liveness at `now` and returns it.
    pub fn refresh(&mut self, now: Instant) -> bool {
        self.live = match self.age(now) {
            Some(age) => age < self.window,
            None => false,
        };
        self.live
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Time since the last packet, if any has arrived.
    pub fn age(&self, now: Instant) -> Option<Duration> {
        self.last_packet
            .map(|last| now.saturating_duration_since(last))
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_starts_down() {
        let mut link = LinkMonitor::new(Duration::from_millis(1000));
        assert_eq!(link.window(), Duration::from_millis(1000));
        assert!(!link.is_live());
        assert!(!link.refresh(Instant::from_millis(10)));
        assert_eq!(link.age(Instant::from_millis(10)), None);
    }

    #[test]
    fn test_link_goes_stale_after_window() {
        let mut link = LinkMonitor::new(Duration::from_millis(1000));
        link.record_packet(Instant::from_millis(500));
        assert!(link.is_live());
        assert!(link.refresh(Instant::from_millis(1499)));
        assert!(!link.refresh(Instant::from_millis(1500)));
        assert!(!link.is_live());

        link.record_packet(Instant::from_millis(1600));
        assert!(link.refresh(Instant::from_millis(1700)));
    }

    #[test]
    fn test_clock_behind_last_packet_counts_as_fresh() {
        let mut link = LinkMonitor::new(Duration::from_millis(100));
        link.record_packet(Instant::from_millis(5_000));
        assert!(link.refresh(Instant::from_millis(4_000)));
        assert_eq!(link.age(Instant::from_millis(4_000)), Some(Duration::from_ticks(0)));
    }
}
