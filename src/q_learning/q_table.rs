//! Value table for tabular Q-learning
//!
//! Every row holds a value for every action, so lookups never need an
//! "unknown action" path. Rows are created lazily, all zeros, the first time a
//! state key is touched.

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

use crate::types::{Action, StateKey};

/// Per-action value estimates for one state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Action, f64>", into = "BTreeMap<Action, f64>")]
pub struct ActionValues([f64; Action::COUNT]);

impl ActionValues {
    pub fn get(&self, action: Action) -> f64 {
        self.0[action.index()]
    }

    pub fn set(&mut self, action: Action, value: f64) {
        self.0[action.index()] = value;
    }

    /// Largest value in the row.
    pub fn max_value(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Every action whose value equals the row maximum.
    pub fn best_actions(&self) -> Vec<Action> {
        let max = self.max_value();
        Action::ALL
            .into_iter()
            .filter(|action| self.get(*action) == max)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        Action::ALL.into_iter().map(|action| (action, self.get(action)))
    }
}

impl From<BTreeMap<Action, f64>> for ActionValues {
    fn from(map: BTreeMap<Action, f64>) -> Self {
        let mut values = ActionValues::default();
        for (action, value) in map {
            values.set(action, value);
        }
        values
    }
}

impl From<ActionValues> for BTreeMap<Action, f64> {
    fn from(values: ActionValues) -> Self {
        values.iter().collect()
    }
}

/// Mapping from state key to per-action value estimates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTable {
    rows: BTreeMap<StateKey, ActionValues>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row for `state`, created all-zero if the state has not been seen.
    pub fn row_mut(&mut self, state: &StateKey) -> &mut ActionValues {
        self.rows.entry(state.clone()).or_default()
    }

    /// Make sure `state` has a row, returning a copy of it.
    pub fn ensure(&mut self, state: &StateKey) -> ActionValues {
        *self.row_mut(state)
    }

    pub fn row(&self, state: &StateKey) -> Option<&ActionValues> {
        self.rows.get(state)
    }

    /// Value of `action` in `state`, zero for unseen states.
    pub fn value(&self, state: &StateKey, action: Action) -> f64 {
        self.row(state).map_or(0.0, |row| row.get(action))
    }

    pub fn contains(&self, state: &StateKey) -> bool {
        self.rows.contains_key(state)
    }

    /// Number of states in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, StateKey, ActionValues> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a ValueTable {
    type Item = (&'a StateKey, &'a ActionValues);
    type IntoIter = btree_map::Iter<'a, StateKey, ActionValues>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
