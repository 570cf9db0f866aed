// types.rs
use core::fmt;

/// Discrete flight phase of the payload.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    #[default]
    Landed = 0,     // On the ground, or telemetry lost
    Rising = 1,     // Climbing under the balloon
    Floating = 2,   // Drifting at altitude
    Descending = 3, // Falling under the parachute
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::Landed,
        Phase::Rising,
        Phase::Floating,
        Phase::Descending,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Phase::Landed => "Landed",
            Phase::Rising => "Rising",
            Phase::Floating => "Floating",
            Phase::Descending => "Descending",
        }
    }

    /// True for every phase in which the payload is off the ground.
    pub const fn is_airborne(self) -> bool {
        !matches!(self, Phase::Landed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Colour sent to the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Unlit indicator.
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scales every channel by `brightness / 255`.
    pub const fn scaled(self, brightness: u8) -> Self {
        const fn scale(channel: u8, brightness: u8) -> u8 {
            ((channel as u16 * brightness as u16) / 255) as u8
        }
        Self {
            r: scale(self.r, brightness),
            g: scale(self.g, brightness),
            b: scale(self.b, brightness),
        }
    }

    pub const fn is_off(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// Mission elapsed time as reported by the telemetry stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    pub secs: u32,
    pub micros: u32,
}

impl Timestamp {
    pub const fn new(secs: u32, micros: u32) -> Self {
        Self { secs, micros }
    }

    pub const fn from_millis(millis: u32) -> Self {
        Self {
            secs: millis / 1000,
            micros: (millis % 1000) * 1000,
        }
    }

    pub const fn as_millis(self) -> u64 {
        self.secs as u64 * 1000 + (self.micros / 1000) as u64
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.secs, self.micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_discriminants() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
        assert_eq!(Phase::default(), Phase::Landed);
    }

    #[test]
    fn test_rgb_scaling() {
        assert_eq!(Rgb::new(255, 128, 0).scaled(255), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::new(255, 128, 0).scaled(0), Rgb::OFF);
        assert_eq!(Rgb::new(255, 100, 10).scaled(51), Rgb::new(51, 20, 2));
    }

    #[test]
    fn test_timestamp_from_millis() {
        let ts = Timestamp::from_millis(12_345);
        assert_eq!(ts, Timestamp::new(12, 345_000));
        assert_eq!(ts.as_millis(), 12_345);
        assert_eq!(std::format!("{}", ts), "12.345000");
    }
}
