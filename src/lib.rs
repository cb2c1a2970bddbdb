//! Tabular Q-learning agent for an external game process
//!
//! The game process writes an observation file, the agent answers with an
//! action file, and a value table is learned in between. This crate provides:
//! - State abstraction from raw observations to a small key space
//! - A value table with ε-greedy selection and one-step Q-learning updates
//! - A crash-tolerant, race-free file exchange channel
//! - The agent loop: a scripted bootstrap, then poll → learn → act
//! - Table persistence and a CLI to run the agent and inspect tables

pub mod abstraction;
pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod observation;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use abstraction::{AbstractionField, StateAbstractor};
pub use error::{Error, Result};
pub use observation::Observation;
pub use q_learning::{QLearningAgent, ValueTable};
pub use types::{Action, StateKey};
