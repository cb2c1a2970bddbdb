//! Value table persistence and resume.

mod common;

use std::path::Path;

use arcade_brain::{
    Action, StateKey,
    adapters::{InMemoryRepository, JsonTableRepository},
    app::{AgentConfig, App},
    ports::TableRepository,
    q_learning::Transition,
};
use common::seeded_agent;
use tempfile::TempDir;

#[test]
fn learned_table_survives_save_and_load() {
    let mut agent = seeded_agent(0.3, 5);
    let states = ["screen:1-dead:0-hammer:0", "screen:1-dead:1-hammer:0", "screen:2-dead:0-hammer:1"];
    for i in 0..60 {
        let state = StateKey::from(states[i % 3]);
        let action = agent.select_action(&state);
        agent.learn(&Transition {
            state,
            action,
            reward: (i as f64 * 0.37).sin(),
            next_state: StateKey::from(states[(i + 1) % 3]),
        });
    }

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("q_table.json");
    let repo = JsonTableRepository::new();
    repo.save(agent.table(), &path).unwrap();
    let loaded = repo.load(&path).unwrap();

    assert_eq!(&loaded, agent.table());
}

#[test]
fn missing_table_starts_empty() {
    let dir = TempDir::new().unwrap();
    let agent = App::new()
        .load_agent(&AgentConfig::default(), dir.path())
        .unwrap();
    assert!(agent.table().is_empty());
    assert_eq!(agent.epsilon(), 1.0);
}

#[test]
fn corrupt_table_refuses_to_start() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("q_table.json"), "[1, 2,").unwrap();
    let result = App::new().load_agent(&AgentConfig::default(), dir.path());
    assert!(result.is_err());
}

#[test]
fn resumed_agent_keeps_values_but_resets_exploration() {
    let repo = InMemoryRepository::new();
    let app = App::for_testing()
        .with_repository(repo.clone())
        .with_default_seed(1)
        .build();
    let config = AgentConfig::default();
    let dir = Path::new("run");

    let mut agent = app.load_agent(&config, dir).unwrap();
    let state = StateKey::from("screen:0-dead:0-hammer:0");
    for _ in 0..10 {
        let action = agent.select_action(&state);
        agent.learn(&Transition {
            state: state.clone(),
            action,
            reward: 2.0,
            next_state: state.clone(),
        });
    }
    assert!(agent.epsilon() < 1.0);
    repo.save(agent.table(), &dir.join(&config.table_file)).unwrap();

    let resumed = app.load_agent(&config, dir).unwrap();
    assert_eq!(resumed.table(), agent.table());
    assert_eq!(resumed.epsilon(), config.initial_epsilon);
    assert!(Action::ALL.iter().any(|&a| resumed.table().value(&state, a) > 0.0));
}
