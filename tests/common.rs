//! Common test utilities for the arcade-brain test suite.

#![allow(dead_code)]

use std::{
    fs,
    path::Path,
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use arcade_brain::{
    Observation, StateAbstractor,
    adapters::{InMemoryRepository, ScriptedChannel},
    pipeline::{AgentLoop, BootstrapSchedule, LoopSettings},
    q_learning::{ExplorationRate, QLearner, QLearningAgent, ValueTable},
};

/// Observation carrying the three default abstraction fields.
pub fn observation(screen: i64, dead: i64, hammer: i64, reward: f64) -> Observation {
    Observation::new(reward)
        .with_field("screen_id", screen)
        .with_field("is_dead", dead)
        .with_field("has_hammer", hammer)
}

/// Agent with the standard α/γ, a fixed ε and a fixed seed.
pub fn seeded_agent(epsilon: f64, seed: u64) -> QLearningAgent {
    QLearningAgent::new(
        ValueTable::new(),
        QLearner::new(0.1, 0.95),
        ExplorationRate::constant(epsilon),
        Some(seed),
    )
}

/// Agent loop over a scripted channel and an in-memory repository.
pub fn scripted_loop(
    channel: ScriptedChannel,
    bootstrap: BootstrapSchedule,
    repo: InMemoryRepository,
    settings: LoopSettings,
) -> AgentLoop<ScriptedChannel> {
    AgentLoop::new(
        channel,
        seeded_agent(0.0, 42),
        StateAbstractor::default(),
        bootstrap,
        Arc::new(repo),
        settings,
    )
}

/// Write a state file the way a well-behaved game process would: complete
/// temporary file first, then rename into place.
pub fn write_state_file(dir: &Path, contents: &str) {
    let tmp = dir.join("state.txt.writing");
    fs::write(&tmp, contents).expect("write temporary state file");
    fs::rename(&tmp, dir.join("state.txt")).expect("rename state file into place");
}

/// Poll `condition` every millisecond until it holds or `timeout` expires.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    condition()
}
