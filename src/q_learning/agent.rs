//! Q-learning agent session
//!
//! The agent owns every piece of mutable learning state: the value table,
//! the exploration rate and the random number generator. The agent loop owns
//! the agent, so nothing here is process-global.

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    q_learning::{
        learner::{QLearner, Transition},
        policy::{ExplorationRate, select_action},
        q_table::ValueTable,
    },
    types::{Action, StateKey},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    table: ValueTable,
    learner: QLearner,
    exploration: ExplorationRate,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create a new Q-learning agent
    ///
    /// # Arguments
    ///
    /// * `table` - Starting value table (empty or loaded from storage)
    /// * `learner` - α and γ for the TD update
    /// * `exploration` - Initial ε, its decay factor and floor
    /// * `seed` - RNG seed; `None` seeds from entropy
    pub fn new(
        table: ValueTable,
        learner: QLearner,
        exploration: ExplorationRate,
        seed: Option<u64>,
    ) -> Self {
        Self {
            table,
            learner,
            exploration,
            rng: build_rng(seed),
        }
    }

    /// ε-greedy action for `state`; decays ε by one step.
    pub fn select_action(&mut self, state: &StateKey) -> Action {
        select_action(&mut self.table, state, &mut self.exploration, &mut self.rng)
    }

    /// Apply the TD update for one transition, returning the new cell value.
    pub fn learn(&mut self, transition: &Transition) -> f64 {
        self.learner.update(&mut self.table, transition)
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn epsilon(&self) -> f64 {
        self.exploration.value()
    }

    pub fn learner(&self) -> &QLearner {
        &self.learner
    }

    pub fn exploration(&self) -> &ExplorationRate {
        &self.exploration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(epsilon: f64, seed: u64) -> QLearningAgent {
        QLearningAgent::new(
            ValueTable::new(),
            QLearner::new(0.1, 0.95),
            ExplorationRate::new(epsilon, 0.9999, 0.01),
            Some(seed),
        )
    }

    #[test]
    fn test_learn_then_select_unseen_state() {
        let mut agent = agent(0.0, 42);
        agent.learn(&Transition {
            state: StateKey::from("A"),
            action: Action::Left,
            reward: 5.0,
            next_state: StateKey::from("B"),
        });

        let b = StateKey::from("B");
        let action = agent.select_action(&b);
        assert!(Action::ALL.contains(&action));
        assert_eq!(agent.table().value(&b, action), 0.0);
        assert!((agent.table().value(&StateKey::from("A"), Action::Left) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let mut a = agent(1.0, 7);
        let mut b = agent(1.0, 7);
        let state = StateKey::from("S");
        let first: Vec<Action> = (0..20).map(|_| a.select_action(&state)).collect();
        let second: Vec<Action> = (0..20).map(|_| b.select_action(&state)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parameters_are_reported() {
        let agent = agent(0.5, 1);
        assert_eq!(agent.learner().learning_rate(), 0.1);
        assert_eq!(agent.learner().discount_factor(), 0.95);
        assert_eq!(agent.exploration().min_epsilon(), 0.01);
        assert_eq!(agent.exploration().value(), agent.epsilon());
    }

    #[test]
    fn test_epsilon_decays_with_each_selection() {
        let mut agent = agent(1.0, 1);
        let state = StateKey::from("S");
        agent.select_action(&state);
        agent.select_action(&state);
        assert!((agent.epsilon() - 0.9999 * 0.9999).abs() < 1e-12);
    }
}
