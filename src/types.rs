//! Newtype wrappers and closed enumerations shared across the crate.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the fixed controller inputs the agent can publish.
///
/// The set is closed and known at compile time. The textual form (`UP`,
/// `DOWN`, ...) is what travels over the exchange channel and what keys each
/// row of the persisted value table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Jump,
    None,
}

impl Action {
    /// Number of actions in the enumeration.
    pub const COUNT: usize = 6;

    /// Every action, in declaration order.
    pub const ALL: [Action; Action::COUNT] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::None,
    ];

    /// Position of this action in [`Action::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire name of the action.
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
            Action::Jump => "JUMP",
            Action::None => "NONE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Action::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| crate::Error::UnknownAction {
                name: trimmed.to_string(),
            })
    }
}

/// Abstracted state identifier used to index the value table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    pub fn new(key: impl Into<String>) -> Self {
        StateKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for StateKey {
    fn from(value: &str) -> Self {
        StateKey(value.to_string())
    }
}

impl From<String> for StateKey {
    fn from(value: String) -> Self {
        StateKey(value)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_index_matches_all_order() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_action_parse_is_case_insensitive() {
        assert_eq!("left".parse::<Action>().unwrap(), Action::Left);
        assert_eq!(" JUMP\n".parse::<Action>().unwrap(), Action::Jump);
        assert!("FIRE".parse::<Action>().is_err());
    }

    #[test]
    fn test_action_display_and_serde_agree() {
        for action in Action::ALL {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{action}\""));
        }
    }

    #[test]
    fn test_state_key_is_transparent() {
        let key = StateKey::from("screen:1-dead:0-hammer:0");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"screen:1-dead:0-hammer:0\"");
    }
}
