use crate::classifier::classify;
use crate::config::PhaseConfig;
use crate::hooks::{Actuator, HookError, Hooks, Indicator, Notifier, SafetyInterlock};
use crate::phase_table::PhaseTable;
use crate::telemetry::{TelemetrySource, VelocitySample};
use crate::types::{Phase, Rgb};

/// Phase bookkeeping retained between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseState {
    /// Phase after the most recent tick.
    pub current: Phase,
    /// Phase as of the last reconciliation that fired (or the last stream loss).
    pub previous: Phase,
    /// Valid packets consumed since startup.
    pub packets: u32,
}

impl PhaseState {
    pub const fn new() -> Self {
        Self {
            current: Phase::Landed,
            previous: Phase::Landed,
            packets: 0,
        }
    }
}

impl Default for PhaseState {
    fn default() -> Self {
        Self::new()
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Phase after the tick.
    pub phase: Phase,
    /// `(from, to)` when a transition fired this tick.
    pub transition: Option<(Phase, Phase)>,
    /// True when the tick took the stream-down branch.
    pub stream_down: bool,
    /// True when the tick emitted a periodic dump.
    pub dumped: bool,
}

/// PhaseDispatcher owns the flight-phase state machine.
/// Each tick reconciles the classifier's candidate against the retained
/// phase, fires side effects once per transition, and falls back to an idle
/// Landed state whenever the telemetry stream is down.
pub struct PhaseDispatcher {
    state: PhaseState,
    table: PhaseTable,
    config: PhaseConfig,
    /// Liveness seen on the previous tick, used to log stream edges once.
    stream_live: bool,
    /// Hook calls that reported an error.
    hook_failures: u32,
}

impl PhaseDispatcher {
    pub const fn new(config: PhaseConfig, table: PhaseTable) -> Self {
        Self {
            state: PhaseState::new(),
            table,
            config,
            stream_live: false,
            hook_failures: 0,
        }
    }

    pub fn state(&self) -> &PhaseState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.current
    }

    pub fn packets(&self) -> u32 {
        self.state.packets
    }

    pub fn hook_failures(&self) -> u32 {
        self.hook_failures
    }

    pub fn config(&self) -> &PhaseConfig {
        &self.config
    }

    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    /// Runs one control-loop iteration: consume at most one sample, classify
    /// it, reconcile, and drive the indicator.
    pub fn tick<S, L, N, I, A>(
        &mut self,
        source: &mut S,
        interlock: &L,
        hooks: &mut Hooks<N, I, A>,
    ) -> TickReport
    where
        S: TelemetrySource,
        L: SafetyInterlock,
        N: Notifier,
        I: Indicator,
        A: Actuator,
    {
        // --- 1. Stream Loss ---
        if !source.is_live() {
            return self.idle(hooks);
        }
        if !self.stream_live {
            info!("Telemetry stream live");
            self.stream_live = true;
        }

        let mut report = TickReport {
            phase: self.state.current,
            transition: None,
            stream_down: false,
            dumped: false,
        };

        // --- 2. Classification & Reconciliation ---
        if source.has_new_sample() {
            match source.consume_sample() {
                Some(sample) if sample.valid => {
                    self.absorb(&sample, &*source, hooks, &mut report)
                }
                Some(_) => debug!("Skipping malformed telemetry sample"),
                None => {}
            }
        }

        // --- 3. Indication ---
        // The interlock is read every tick so pulling the pin takes effect at once.
        let color = if interlock.is_armed() {
            self.table
                .color(self.state.current)
                .scaled(self.config.indicator_brightness)
        } else {
            Rgb::OFF
        };
        let result = hooks.indicator.set_color(color);
        self.settle(result, "indicator");

        report.phase = self.state.current;
        report
    }

    fn absorb<S, N, I, A>(
        &mut self,
        sample: &VelocitySample,
        source: &S,
        hooks: &mut Hooks<N, I, A>,
        report: &mut TickReport,
    ) where
        S: TelemetrySource,
        N: Notifier,
        I: Indicator,
        A: Actuator,
    {
        self.state.packets = self.state.packets.saturating_add(1);
        self.state.current = classify(sample.velocity_down, self.state.current, &self.config);

        if self.state.current != self.state.previous {
            let from = self.state.previous;
            let to = self.state.current;
            info!("Phase change: {} -> {}", from.name(), to.name());

            let result = hooks.notifier.on_phase_changed(self.table.description(to));
            self.settle(result, "notifier");
            self.state.previous = to;
            report.transition = Some((from, to));
        }

        // A zero interval disables the dump rather than dividing by zero.
        if self.state.packets.checked_rem(self.config.dump_every_n_packets) == Some(0) {
            let altitude = source.current_altitude();
            let elapsed = source.elapsed_time();
            let result = hooks.notifier.on_periodic_dump(sample, altitude, elapsed);
            self.settle(result, "notifier");
            report.dumped = true;

            if altitude >= self.config.altitude_trigger {
                let result = hooks.actuator.on_altitude_threshold_crossed();
                self.settle(result, "actuator");
            }
        }
    }

    fn idle<N, I, A>(&mut self, hooks: &mut Hooks<N, I, A>) -> TickReport
    where
        N: Notifier,
        I: Indicator,
        A: Actuator,
    {
        if self.stream_live {
            warn!("Telemetry stream stale, forcing {}", Phase::Landed.name());
            self.stream_live = false;
        }

        // Resetting `previous` makes the first sample after recovery report a
        // fresh transition out of Landed.
        self.state.current = Phase::Landed;
        self.state.previous = Phase::Landed;

        let result = hooks.indicator.set_color(self.config.idle_color);
        self.settle(result, "indicator");

        TickReport {
            phase: Phase::Landed,
            transition: None,
            stream_down: true,
            dumped: false,
        }
    }

    fn settle(&mut self, result: Result<(), HookError>, hook: &'static str) {
        if let Err(err) = result {
            self.hook_failures = self.hook_failures.saturating_add(1);
            warn!("{} hook error: {}", hook, err);
        }
    }
}
