// telemetry/mod.rs
pub mod frame;
pub mod link;
pub mod queue;
pub mod types;

pub use frame::FrameError;
pub use link::LinkMonitor;
pub use queue::QueuedSource;
pub use types::*;
