use crate::types::{Phase, Rgb};

/// Operator-facing metadata for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseDescriptor {
    pub description: &'static str,
    pub color: Rgb,
}

/// Read-only phase -> descriptor mapping, built once at startup and handed to
/// the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTable {
    entries: [PhaseDescriptor; 4],
}

impl PhaseTable {
    /// Entries are indexed by `Phase::index()`.
    pub const fn new(entries: [PhaseDescriptor; 4]) -> Self {
        Self { entries }
    }

    pub const fn standard() -> Self {
        Self::new([
            PhaseDescriptor {
                description: "Landed",
                color: Rgb::new(0, 0, 255),
            },
            PhaseDescriptor {
                description: "Rising",
                color: Rgb::new(0, 255, 0),
            },
            PhaseDescriptor {
                description: "Floating",
                color: Rgb::new(255, 160, 0),
            },
            PhaseDescriptor {
                description: "Descending",
                color: Rgb::new(255, 0, 0),
            },
        ])
    }

    pub const fn descriptor(&self, phase: Phase) -> &PhaseDescriptor {
        &self.entries[phase.index()]
    }

    pub const fn description(&self, phase: Phase) -> &'static str {
        self.descriptor(phase).description
    }

    pub const fn color(&self, phase: Phase) -> Rgb {
        self.descriptor(phase).color
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_covers_every_phase() {
        let table = PhaseTable::standard();
        for phase in Phase::ALL {
            assert_eq!(table.description(phase), phase.name());
            assert!(!table.color(phase).is_off());
        }
    }

    #[test]
    fn test_custom_table_lookup() {
        let mut entries = [PhaseDescriptor {
            description: "idle",
            color: Rgb::OFF,
        }; 4];
        entries[Phase::Floating.index()] = PhaseDescriptor {
            description: "Drifting",
            color: Rgb::new(1, 2, 3),
        };
        let table = PhaseTable::new(entries);
        assert_eq!(table.description(Phase::Floating), "Drifting");
        assert_eq!(table.color(Phase::Floating), Rgb::new(1, 2, 3));
        assert_eq!(table.description(Phase::Rising), "idle");
    }
}
