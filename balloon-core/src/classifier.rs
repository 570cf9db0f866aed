use crate::config::PhaseConfig;
use crate::types::Phase;

/// Maps a downward-velocity reading to a candidate phase.
///
/// Rules are tried in order and the first match wins:
/// 1. below the rise threshold the payload is `Rising`;
/// 2. inside the band up to the descend threshold it is `Floating`, but only
///    once it has left the ground, so a payload sitting still on the pad is
///    never reported as floating;
/// 3. at or above the descend threshold it is `Descending`;
/// 4. anything else is `Landed`.
///
/// Total over `f32`: a NaN reading fails every comparison and lands on rule 4.
pub fn classify(velocity_down: f32, current: Phase, config: &PhaseConfig) -> Phase {
    let rise = config.rise_threshold;
    let descend = config.descend_threshold;

    if velocity_down < rise {
        Phase::Rising
    } else if velocity_down >= rise && velocity_down < descend && current.is_airborne() {
        Phase::Floating
    } else if velocity_down >= descend {
        Phase::Descending
    } else {
        Phase::Landed
    }
}
