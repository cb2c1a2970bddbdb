//! Observation records emitted by the game process.
//!
//! The inbound file carries one `key:value` pair per line. The reserved key
//! `reward` is a float; every other key is an integer field.

use std::collections::BTreeMap;

use crate::{Error, Result};

/// Key reserved for the reward signal.
pub const REWARD_KEY: &str = "reward";

/// One snapshot of observable game state plus the reward earned since the
/// previous snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Observation {
    fields: BTreeMap<String, i64>,
    reward: f64,
}

impl Observation {
    pub fn new(reward: f64) -> Self {
        Self {
            fields: BTreeMap::new(),
            reward,
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: impl Into<String>, value: i64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Parse the contents of an inbound observation file.
    ///
    /// Lines without a `:` separator are ignored. A missing `reward` line
    /// yields a reward of 0. A later duplicate key overrides an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedObservation`] if a value does not parse as
    /// the expected number type.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut observation = Observation::default();

        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            let malformed = |reason: String| Error::MalformedObservation {
                line: index + 1,
                content: line.to_string(),
                reason,
            };

            if key == REWARD_KEY {
                let reward = value
                    .parse::<f64>()
                    .map_err(|e| malformed(format!("reward is not a number: {e}")))?;
                if !reward.is_finite() {
                    return Err(malformed("reward must be finite".to_string()));
                }
                observation.reward = reward;
            } else {
                let parsed = value
                    .parse::<i64>()
                    .map_err(|e| malformed(format!("field '{key}' is not an integer: {e}")))?;
                observation.fields.insert(key.to_string(), parsed);
            }
        }

        Ok(observation)
    }

    pub fn field(&self, name: &str) -> Option<i64> {
        self.fields.get(name).copied()
    }

    /// True if the record carries no integer fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn reward(&self) -> f64 {
        self.reward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields_and_reward() {
        let obs = Observation::parse("screen_id:2\nis_dead:0\nreward:-1.5\n").unwrap();
        assert_eq!(obs.field("screen_id"), Some(2));
        assert_eq!(obs.field("is_dead"), Some(0));
        assert_eq!(obs.reward(), -1.5);
    }

    #[test]
    fn test_parse_ignores_lines_without_separator() {
        let obs = Observation::parse("garbage\n\nscreen_id:1\n").unwrap();
        assert_eq!(obs.field("screen_id"), Some(1));
        assert_eq!(obs.reward(), 0.0);
    }

    #[test]
    fn test_parse_tolerates_crlf_and_spaces() {
        let obs = Observation::parse("screen_id: 3\r\nreward : 10\r\n").unwrap();
        assert_eq!(obs.field("screen_id"), Some(3));
        assert_eq!(obs.reward(), 10.0);
    }

    #[test]
    fn test_non_integer_field_is_malformed() {
        let err = Observation::parse("screen_id:1\nis_dead:yes\n").unwrap_err();
        match err {
            Error::MalformedObservation { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_reward_is_malformed() {
        assert!(Observation::parse("reward:lots\n").is_err());
        assert!(Observation::parse("reward:NaN\n").is_err());
    }

    #[test]
    fn test_reward_only_is_empty() {
        let obs = Observation::parse("reward:5\n").unwrap();
        assert!(obs.is_empty());
        assert_eq!(obs.reward(), 5.0);
    }
}
