//! ε-greedy action selection with per-decision exploration decay

use rand::Rng;

use crate::{
    q_learning::q_table::ValueTable,
    types::{Action, StateKey},
};

/// Exploration rate ε with multiplicative decay toward a floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorationRate {
    epsilon: f64,
    decay: f64,
    min_epsilon: f64,
}

impl ExplorationRate {
    pub fn new(epsilon: f64, decay: f64, min_epsilon: f64) -> Self {
        Self {
            epsilon,
            decay,
            min_epsilon,
        }
    }

    /// Fixed rate that never decays.
    pub fn constant(epsilon: f64) -> Self {
        Self::new(epsilon, 1.0, epsilon)
    }

    pub fn value(&self) -> f64 {
        self.epsilon
    }

    pub fn min_epsilon(&self) -> f64 {
        self.min_epsilon
    }

    /// One decay step. No-op once ε has reached the floor.
    pub fn decay(&mut self) {
        if self.epsilon > self.min_epsilon {
            self.epsilon = (self.epsilon * self.decay).max(self.min_epsilon);
        }
    }
}

/// Choose an action for `state` and decay the exploration rate once.
///
/// With probability ε a uniformly random action is returned; otherwise the
/// highest-valued action, with ties broken uniformly at random. The state's
/// row is created (all zeros) if it does not exist yet.
pub fn select_action<R: Rng + ?Sized>(
    table: &mut ValueTable,
    state: &StateKey,
    exploration: &mut ExplorationRate,
    rng: &mut R,
) -> Action {
    let row = table.ensure(state);

    let action = if rng.random::<f64>() < exploration.value() {
        random_action(rng)
    } else {
        let best = row.best_actions();
        if best.is_empty() {
            // Only reachable if every value is NaN.
            random_action(rng)
        } else {
            best[rng.random_range(0..best.len())]
        }
    };

    exploration.decay();
    action
}

fn random_action<R: Rng + ?Sized>(rng: &mut R) -> Action {
    Action::ALL[rng.random_range(0..Action::COUNT)]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_greedy_picks_unique_maximum() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut table = ValueTable::new();
        let state = StateKey::from("S");
        table.row_mut(&state).set(Action::Right, 0.5);
        table.row_mut(&state).set(Action::Up, -0.5);
        let mut exploration = ExplorationRate::constant(0.0);

        for _ in 0..50 {
            assert_eq!(
                select_action(&mut table, &state, &mut exploration, &mut rng),
                Action::Right
            );
        }
    }

    #[test]
    fn test_ties_are_broken_randomly() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut table = ValueTable::new();
        let state = StateKey::from("S");
        table.row_mut(&state).set(Action::Left, 1.0);
        table.row_mut(&state).set(Action::Jump, 1.0);
        let mut exploration = ExplorationRate::constant(0.0);

        let seen: HashSet<Action> = (0..200)
            .map(|_| select_action(&mut table, &state, &mut exploration, &mut rng))
            .collect();
        assert_eq!(seen, HashSet::from([Action::Left, Action::Jump]));
    }

    #[test]
    fn test_full_exploration_covers_every_action() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut table = ValueTable::new();
        let state = StateKey::from("S");
        table.row_mut(&state).set(Action::Down, 100.0);
        let mut exploration = ExplorationRate::constant(1.0);

        let seen: HashSet<Action> = (0..500)
            .map(|_| select_action(&mut table, &state, &mut exploration, &mut rng))
            .collect();
        assert_eq!(seen.len(), Action::COUNT);
    }

    #[test]
    fn test_selection_initializes_unseen_state() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut table = ValueTable::new();
        let state = StateKey::from("fresh");
        let mut exploration = ExplorationRate::constant(0.0);

        let action = select_action(&mut table, &state, &mut exploration, &mut rng);
        assert!(Action::ALL.contains(&action));
        let row = table.row(&state).unwrap();
        assert!(row.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn test_decay_once_per_decision() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut table = ValueTable::new();
        let state = StateKey::from("S");
        let mut exploration = ExplorationRate::new(1.0, 0.5, 0.1);

        select_action(&mut table, &state, &mut exploration, &mut rng);
        assert_eq!(exploration.value(), 0.5);
        select_action(&mut table, &state, &mut exploration, &mut rng);
        assert_eq!(exploration.value(), 0.25);
    }

    #[test]
    fn test_decay_stops_at_floor() {
        let mut exploration = ExplorationRate::new(0.3, 0.5, 0.2);
        exploration.decay();
        assert_eq!(exploration.value(), 0.2);
        exploration.decay();
        assert_eq!(exploration.value(), 0.2);
    }

    #[test]
    fn test_decay_is_monotonic() {
        let mut exploration = ExplorationRate::new(1.0, 0.9999, 0.01);
        let mut previous = exploration.value();
        for _ in 0..10_000 {
            exploration.decay();
            assert!(exploration.value() <= previous);
            assert!(exploration.value() >= 0.01);
            previous = exploration.value();
        }
    }
}
