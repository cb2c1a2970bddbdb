//! Agent loop and its supporting pieces
//!
//! This module provides:
//! - The bootstrap schedule run before learning
//! - The agent loop that drives poll → learn → act
//! - Observers for logging, progress display and metrics

pub mod bootstrap;
pub mod observers;
pub mod runner;

pub use bootstrap::{BootstrapSchedule, BootstrapSegment};
pub use observers::{LoggingObserver, LoopMetrics, MetricsObserver, ProgressObserver};
pub use runner::{AgentLoop, LoopSettings, Phase, TickOutcome};

pub use crate::ports::{Observer, StepReport};
