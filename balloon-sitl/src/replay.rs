use balloon_core::{Timestamp, VelocitySample, decode_frame, warn};
use std::path::Path;

/// A recorded telemetry log, delivered frame by frame against a simulated
/// clock.
pub struct ReplayLog {
    frames: Vec<(u64, VelocitySample)>,
    cursor: usize,
}

impl ReplayLog {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::parse(&raw))
    }

    /// Blank lines and `#` comments are ignored. Lines that fail to decode
    /// are kept as invalid samples so the controller sees the bad packet.
    pub fn parse(raw: &str) -> Self {
        let mut frames = Vec::new();
        let mut last_ms = 0u64;

        for (n, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let sample = match decode_frame(line.as_bytes()) {
                Ok(sample) => sample,
                Err(err) => {
                    warn!("line {}: {}", n + 1, err);
                    VelocitySample::invalid(Timestamp::from_millis(last_ms as u32))
                }
            };
            // Out-of-order frames are delivered in file order.
            let at_ms = sample.elapsed.as_millis().max(last_ms);
            last_ms = at_ms;
            frames.push((at_ms, sample));
        }

        Self { frames, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Delivery time of the final frame.
    pub fn last_millis(&self) -> u64 {
        self.frames.last().map_or(0, |(at_ms, _)| *at_ms)
    }

    /// Frames due at or before `now_ms` that have not been delivered yet.
    pub fn due(&mut self, now_ms: u64) -> impl Iterator<Item = VelocitySample> + '_ {
        std::iter::from_fn(move || {
            let (at_ms, sample) = *self.frames.get(self.cursor)?;
            if at_ms > now_ms {
                return None;
            }
            self.cursor += 1;
            Some(sample)
        })
    }

    pub fn finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LOG: &str = "\
# recorded 2026-06-02
$VEL,1000,-3.25,1520.5*58

$VEL,2000,0.40,15320.0*40
$VEL,bad*00
$VEL,3000,6.10,14200.2*42
";

    #[test]
    fn test_parse_skips_comments_and_keeps_bad_lines() {
        let log = ReplayLog::parse(LOG);
        assert_eq!(log.len(), 4);
        assert_eq!(log.last_millis(), 3000);
    }

    #[test]
    fn test_due_delivers_in_order() {
        let mut log = ReplayLog::parse(LOG);
        assert_eq!(log.due(500).count(), 0);

        let first: Vec<_> = log.due(1000).collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].velocity_down, -3.25);

        let next: Vec<_> = log.due(2500).collect();
        assert_eq!(next.len(), 2);
        assert!(next[0].valid);
        assert!(!next[1].valid);
        assert_eq!(next[1].elapsed, Timestamp::from_millis(2000));

        assert!(!log.finished());
        assert_eq!(log.due(10_000).count(), 1);
        assert!(log.finished());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LOG.as_bytes()).unwrap();
        let log = ReplayLog::load(file.path()).unwrap();
        assert_eq!(log.len(), 4);
    }
}
