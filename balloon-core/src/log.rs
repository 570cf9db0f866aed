use crate::telemetry::VelocitySample;
use crate::types::Timestamp;
use core::fmt::Write;
use proc_macros::TelemetryPayload;

// A safe upper bound for any single CSV row (Tag + Timestamp + Data + Newline)
pub const MAX_LOG_LINE_LEN: usize = 128;

/// Diagnostic row emitted on every periodic-dump tick.
#[derive(Clone, Copy, Debug, PartialEq, TelemetryPayload)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DumpRecord {
    #[timestamp]
    pub elapsed: Timestamp,
    pub velocity_down: f32,
    pub altitude: f32,
}

impl DumpRecord {
    pub fn new(sample: &VelocitySample, altitude: f32, elapsed: Timestamp) -> Self {
        Self {
            elapsed,
            velocity_down: sample.velocity_down,
            altitude,
        }
    }
}

impl Loggable for DumpRecord {
    const TAG: &'static str = "D";
    fn format_payload<const SIZE: usize>(&self, cursor: &mut LogBuffer<SIZE>) -> core::fmt::Result {
        write!(cursor, "{:.2},{:.1}", self.velocity_down, self.altitude)
    }
}

// Phase change announcements are logged as plain event text.
impl Loggable for &str {
    const TAG: &'static str = "E";
    fn format_payload<const SIZE: usize>(&self, cursor: &mut LogBuffer<SIZE>) -> core::fmt::Result {
        cursor.write_str(self)
    }
}

// A trait for types that can be logged
pub trait Loggable {
    /// The 'Tag' that identifies this row (e.g., 'D', 'E')
    const TAG: &'static str;

    /// Only write the fields and commas. Do NOT write the tag, timestamp, or \n.
    fn format_payload<const SIZE: usize>(&self, cursor: &mut LogBuffer<SIZE>) -> core::fmt::Result;
}

/// Writes the `#` header lines describing every row type.
pub fn write_schema<const SIZE: usize>(cursor: &mut LogBuffer<SIZE>) -> core::fmt::Result {
    writeln!(cursor, "# SCHEMA DEFINITION")?;
    writeln!(
        cursor,
        "# {},elapsed,{}",
        DumpRecord::TAG,
        DumpRecord::CSV_HEADER
    )?;
    writeln!(cursor, "# E,elapsed,event_msg")?;
    Ok(())
}

// Helper for formatting into a buffer
pub struct LogBuffer<const SIZE: usize> {
    buf: [u8; SIZE],
    pos: usize,
}

impl<const SIZE: usize> core::fmt::Write for LogBuffer<SIZE> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let remainder = self.buf.len() - self.pos;
        if remainder < bytes.len() {
            return Err(core::fmt::Error);
        }

        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }
}

impl<const SIZE: usize> LogBuffer<SIZE> {
    pub const fn new() -> Self {
        Self {
            buf: [0u8; SIZE],
            pos: 0,
        }
    }

    /// Appends one `TAG,elapsed,payload\n` row.
    /// Returns the number of bytes written; a row that does not fit leaves the
    /// buffer unchanged.
    pub fn write_record<T: Loggable>(
        &mut self,
        elapsed: Timestamp,
        record: &T,
    ) -> Result<usize, core::fmt::Error> {
        let start_pos = self.pos;
        if let Err(err) = self.write_line(elapsed, record) {
            self.pos = start_pos;
            return Err(err);
        }
        Ok(self.pos - start_pos)
    }

    // This is the "Contract" - it forces the format: TAG, ELAPSED, PAYLOAD... \n
    fn write_line<T: Loggable>(&mut self, elapsed: Timestamp, record: &T) -> core::fmt::Result {
        write!(self, "{},{},", T::TAG, elapsed)?;
        record.format_payload(self)?;
        self.write_str("\n")
    }

    pub fn space_remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

impl<const SIZE: usize> Default for LogBuffer<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_header_skips_timestamp() {
        assert_eq!(DumpRecord::CSV_HEADER, "velocity_down,altitude");
        assert_eq!(DumpRecord::CSV_COLUMNS, 2);
    }

    #[test]
    fn test_write_dump_row() {
        let sample = VelocitySample::new(-3.5, 15_200.0, Timestamp::from_millis(61_250));
        let record = DumpRecord::new(&sample, 15_200.0, sample.elapsed);
        let mut buf = LogBuffer::<MAX_LOG_LINE_LEN>::new();
        let written = buf.write_record(record.elapsed, &record).unwrap();
        assert_eq!(buf.as_str(), "D,61.250000,-3.50,15200.0\n");
        assert_eq!(written, buf.as_str().len());
    }

    #[test]
    fn test_write_event_row() {
        let mut buf = LogBuffer::<64>::new();
        buf.write_record(Timestamp::new(2, 5), &"Rising").unwrap();
        assert_eq!(buf.as_str(), "E,2.000005,Rising\n");
    }

    #[test]
    fn test_overflow_leaves_buffer_untouched() {
        let mut buf = LogBuffer::<24>::new();
        buf.write_record(Timestamp::new(1, 0), &"ok").unwrap();
        let before = buf.as_str().len();
        assert!(buf.write_record(Timestamp::new(1, 0), &"too long to fit").is_err());
        assert_eq!(buf.as_str().len(), before);
        buf.reset();
        assert_eq!(buf.space_remaining(), 24);
    }

    #[test]
    fn test_schema_lists_dump_columns() {
        let mut buf = LogBuffer::<MAX_LOG_LINE_LEN>::new();
        write_schema(&mut buf).unwrap();
        assert!(buf.as_str().contains("# D,elapsed,velocity_down,altitude"));
    }
}
