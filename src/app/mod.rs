//! Application layer: configuration and the dependency injection container.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  App (DI container)                          │
//! │    owns TableRepository, builds AgentLoop    │
//! └──────────────┬───────────────────────────────┘
//!                │ wires
//!                ▼
//! ┌──────────────────────────────────────────────┐
//! │  Adapters: FileChannel, JsonTableRepository, │
//! │            InMemoryRepository, Scripted...   │
//! └──────────────┬───────────────────────────────┘
//!                │ implement
//!                ▼
//! ┌──────────────────────────────────────────────┐
//! │  Ports: ExchangeChannel, TableRepository,    │
//! │         Observer                             │
//! └──────────────┬───────────────────────────────┘
//!                │ used by
//!                ▼
//! ┌──────────────────────────────────────────────┐
//! │  Core: StateAbstractor, QLearningAgent,      │
//! │        AgentLoop                             │
//! └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod container;

pub use config::AgentConfig;
pub use container::{App, AppBuilder};
