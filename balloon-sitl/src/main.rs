use balloon_core::log::{LogBuffer, write_schema};
use balloon_core::{
    Hooks, PhaseConfig, PhaseDispatcher, PhaseTable, QueuedSource, Timestamp, error, info, warn,
};
use clap::Parser;
use embassy_time::Instant;
use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::{Duration, Instant as WallClock};

mod hooks;
mod replay;

use hooks::{CameraLog, ConsoleNotifier, LoggingIndicator};
use replay::ReplayLog;

/// Replays a recorded telemetry log through the flight-phase controller.
#[derive(Parser, Debug)]
#[command(name = "balloon-sitl", version)]
struct Args {
    /// Telemetry log, one `$VEL` frame per line.
    log: PathBuf,

    /// JSON file overriding controller tunables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep the safety pin in (indicator stays dark).
    #[arg(long)]
    disarmed: bool,

    /// Control loop rate.
    #[arg(long, default_value_t = 10)]
    rate_hz: u32,

    /// Advance the simulated clock without sleeping.
    #[arg(long)]
    fast: bool,

    /// Simulated time to keep running after the last frame, in milliseconds.
    #[arg(long, default_value_t = 6_000)]
    tail_ms: u64,
}

fn load_config(path: Option<&Path>) -> Result<PhaseConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(PhaseConfig::default());
    };
    let raw = std::fs::read_to_string(path)?;
    let config: PhaseConfig = serde_json::from_str(&raw)?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    config.validate()?;

    let mut log = ReplayLog::load(&args.log)?;
    if log.is_empty() {
        warn!("{} holds no telemetry frames", args.log.display());
    } else {
        info!("Loaded {} frames from {}", log.len(), args.log.display());
    }

    let mut source: QueuedSource<32> = QueuedSource::new(config.staleness_window());
    let mut dispatcher = PhaseDispatcher::new(config, PhaseTable::standard());
    let mut hooks = Hooks::new(
        ConsoleNotifier::new(std::io::stdout()),
        LoggingIndicator::default(),
        CameraLog::default(),
    );
    let interlock = !args.disarmed;
    if !interlock {
        info!("Safety pin in place, indicator disabled");
    }

    let mut schema = LogBuffer::<256>::new();
    write_schema(&mut schema)?;
    hooks.notifier.write_raw(schema.as_str())?;

    let period = Duration::from_millis(1000 / u64::from(args.rate_hz.clamp(1, 1000)));
    let period_ms = period.as_millis() as u64;
    let end_ms = log.last_millis() + args.tail_ms;
    let mut sim_ms = 0u64;

    // --- MAIN CONTROL LOOP ---
    while !log.finished() || sim_ms <= end_ms {
        let started = WallClock::now();
        let now = Instant::from_millis(sim_ms);

        // 1. Ingest whatever arrived since the last tick
        for sample in log.due(sim_ms) {
            // Overflow is logged and counted by the queue.
            let _ = source.push(sample, now);
        }
        source.refresh(now);

        // 2. One controller tick
        hooks
            .notifier
            .set_clock(Timestamp::from_millis(sim_ms as u32));
        dispatcher.tick(&mut source, &interlock, &mut hooks);

        sim_ms += period_ms;

        // 3. Pace the loop and flag ticks that overran their slot
        if !args.fast {
            let spent = started.elapsed();
            if spent > period {
                error!(
                    "LOOP OVERRUN: tick took {}us of a {}us slot",
                    spent.as_micros(),
                    period.as_micros()
                );
            } else {
                sleep(period - spent);
            }
        }
    }

    info!(
        "Replay complete: {} packets, final phase {}, {} camera frames, {} hook errors, {} dropped",
        dispatcher.packets(),
        dispatcher.phase(),
        hooks.actuator.frames(),
        dispatcher.hook_failures(),
        source.dropped()
    );
    Ok(())
}
