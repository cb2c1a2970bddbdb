//! Tabular Q-learning
//!
//! Temporal difference control over a small, abstracted state space. The
//! update bootstraps from the best next-state value regardless of which
//! action is actually taken next, which makes it off-policy.
//!
//! ## Components
//!
//! | Module | Role |
//! |--------|------|
//! | `q_table` | State key → per-action values, rows created lazily |
//! | `policy` | ε-greedy selection, randomized tie-break, per-decision decay |
//! | `learner` | Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)] |
//! | `agent` | Session object tying the three together |
//!
//! ## Usage Example
//!
//! ```
//! use arcade_brain::q_learning::{ExplorationRate, QLearner, QLearningAgent, Transition, ValueTable};
//! use arcade_brain::types::{Action, StateKey};
//!
//! let mut agent = QLearningAgent::new(
//!     ValueTable::new(),
//!     QLearner::new(0.1, 0.95),
//!     ExplorationRate::new(1.0, 0.9999, 0.01),
//!     Some(42),
//! );
//!
//! let state = StateKey::from("screen:1-dead:0-hammer:0");
//! let action = agent.select_action(&state);
//! agent.learn(&Transition {
//!     state: state.clone(),
//!     action,
//!     reward: 1.0,
//!     next_state: state,
//! });
//! ```

pub mod agent;
pub mod learner;
pub mod policy;
pub mod q_table;

// Public re-exports
pub use agent::QLearningAgent;
pub use learner::{QLearner, Transition};
pub use policy::{ExplorationRate, select_action};
pub use q_table::{ActionValues, ValueTable};
