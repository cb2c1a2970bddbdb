//! One-step Q-learning update

use crate::{
    q_learning::q_table::ValueTable,
    types::{Action, StateKey},
};

/// A single observed step: in `state` the agent took `action`, received
/// `reward`, and ended up in `next_state`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: StateKey,
    pub action: Action,
    pub reward: f64,
    pub next_state: StateKey,
}

/// Off-policy temporal difference learner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearner {
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QLearner {
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Both states get a zero row if unseen. Only the `(state, action)` cell
    /// changes. Returns the new value of that cell.
    pub fn update(&self, table: &mut ValueTable, transition: &Transition) -> f64 {
        let max_next_q = table.ensure(&transition.next_state).max_value();
        let row = table.row_mut(&transition.state);
        let current_q = row.get(transition.action);
        let td_target = transition.reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        row.set(transition.action, new_q);
        new_q
    }
}
