//! State abstraction: collapse an observation into a small, hashable key.
//!
//! Only the configured fields contribute to the key. Everything else in the
//! observation is dropped, which is what keeps the value table small enough
//! to converge.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, observation::Observation, types::StateKey};

/// An observation field that participates in the state key, with the short
/// label used for it inside the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractionField {
    pub field: String,
    pub label: String,
}

impl AbstractionField {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
        }
    }
}

impl FromStr for AbstractionField {
    type Err = Error;

    /// Parses `field` or `field=label`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidAbstractionField {
            input: s.to_string(),
        };
        let (field, label) = match s.split_once('=') {
            Some((field, label)) => (field.trim(), label.trim()),
            None => (s.trim(), s.trim()),
        };
        let reserved = |part: &str| part.contains([':', '-']) || part.is_empty();
        if reserved(field) || reserved(label) || field == crate::observation::REWARD_KEY {
            return Err(invalid());
        }
        Ok(AbstractionField::new(field, label))
    }
}

impl fmt::Display for AbstractionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field == self.label {
            write!(f, "{}", self.field)
        } else {
            write!(f, "{}={}", self.field, self.label)
        }
    }
}

/// Default abstraction: which screen, whether Mario is dead, whether he holds
/// the hammer.
pub fn default_fields() -> Vec<AbstractionField> {
    vec![
        AbstractionField::new("screen_id", "screen"),
        AbstractionField::new("is_dead", "dead"),
        AbstractionField::new("has_hammer", "hammer"),
    ]
}

/// Maps observations onto [`StateKey`]s.
#[derive(Debug, Clone)]
pub struct StateAbstractor {
    fields: Vec<AbstractionField>,
}

impl StateAbstractor {
    pub fn new(fields: Vec<AbstractionField>) -> Self {
        Self { fields }
    }

    /// Abstract an observation into a state key.
    ///
    /// Returns `None` when there is no observation, or when the observation
    /// carries no integer fields; neither is a learnable state. Abstraction
    /// fields missing from the observation contribute `0`.
    pub fn abstract_state(&self, observation: Option<&Observation>) -> Option<StateKey> {
        let observation = observation.filter(|obs| !obs.is_empty())?;
        let key = self
            .fields
            .iter()
            .map(|f| format!("{}:{}", f.label, observation.field(&f.field).unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("-");
        Some(StateKey::new(key))
    }
}

impl Default for StateAbstractor {
    fn default() -> Self {
        Self::new(default_fields())
    }
}
