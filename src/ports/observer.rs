//! Observer port - watching the agent loop without coupling to it
//!
//! The loop reports what it does through this trait. Logging, progress
//! display and metrics are all observers; the loop itself prints nothing.

use crate::{
    Error, Result,
    types::{Action, StateKey},
};

/// Summary of one completed learning step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Learning steps completed so far, including this one
    pub step: u64,
    /// Abstracted state the action was chosen for
    pub state: StateKey,
    /// Action published for that state
    pub action: Action,
    /// Reward carried by the observation that produced `state`
    pub reward: f64,
    /// Exploration rate after this decision's decay
    pub epsilon: f64,
    /// New value of the updated cell, if a transition was learned
    pub updated_value: Option<f64>,
}

/// Observer trait for monitoring the agent loop
///
/// # Event Sequence
///
/// 1. `on_start(table_states)` - once, before the first tick
/// 2. `on_bootstrap_action(action)` - for each scripted action published
/// 3. `on_learning_started()` - once, when the bootstrap sequence ends
/// 4. `on_step(report)` - after every learning step
/// 5. `on_table_saved(steps, states)` - after every successful save
/// 6. `on_tick_failed(error)` - whenever a tick hits a recoverable error
/// 7. `on_stop(steps)` - once, after the final save
///
/// All methods default to doing nothing.
pub trait Observer: Send {
    fn on_start(&mut self, _table_states: usize) -> Result<()> {
        Ok(())
    }

    fn on_bootstrap_action(&mut self, _action: Action) -> Result<()> {
        Ok(())
    }

    fn on_learning_started(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_step(&mut self, _report: &StepReport) -> Result<()> {
        Ok(())
    }

    fn on_table_saved(&mut self, _steps: u64, _states: usize) -> Result<()> {
        Ok(())
    }

    /// Called with errors the loop recovered from by skipping work.
    fn on_tick_failed(&mut self, _error: &Error) -> Result<()> {
        Ok(())
    }

    fn on_stop(&mut self, _steps: u64) -> Result<()> {
        Ok(())
    }
}
