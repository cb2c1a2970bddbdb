//! Scripted exchange channel for tests and dry runs.

use std::{collections::VecDeque, io};

use crate::{Error, Result, observation::Observation, ports::ExchangeChannel, types::Action};

#[derive(Debug, Clone)]
enum Inbound {
    Nothing,
    Observation(Observation),
    Failure(String),
}

/// In-memory channel that replays a fixed script of inbound events and
/// records every published action.
///
/// Once the script runs out every poll returns `Ok(None)`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChannel {
    inbound: VecDeque<Inbound>,
    published: Vec<Action>,
    polls: usize,
    fail_publishes: bool,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an observation.
    pub fn push_observation(&mut self, observation: Observation) -> &mut Self {
        self.inbound.push_back(Inbound::Observation(observation));
        self
    }

    /// Queue a poll that finds nothing.
    pub fn push_nothing(&mut self) -> &mut Self {
        self.inbound.push_back(Inbound::Nothing);
        self
    }

    /// Queue a poll that fails with an I/O error.
    pub fn push_failure(&mut self, message: impl Into<String>) -> &mut Self {
        self.inbound.push_back(Inbound::Failure(message.into()));
        self
    }

    /// Make every subsequent publish fail.
    pub fn fail_publishes(&mut self, fail: bool) -> &mut Self {
        self.fail_publishes = fail;
        self
    }

    pub fn published(&self) -> &[Action] {
        &self.published
    }

    /// Number of times the inbound side has been polled.
    pub fn polls(&self) -> usize {
        self.polls
    }

    pub fn pending(&self) -> usize {
        self.inbound.len()
    }
}

impl ExchangeChannel for ScriptedChannel {
    fn poll_observation(&mut self) -> Result<Option<Observation>> {
        self.polls += 1;
        match self.inbound.pop_front() {
            None | Some(Inbound::Nothing) => Ok(None),
            Some(Inbound::Observation(observation)) => Ok(Some(observation)),
            Some(Inbound::Failure(message)) => Err(Error::io(
                "read scripted observation",
                io::Error::other(message),
            )),
        }
    }

    fn publish_action(&mut self, action: Action) -> Result<()> {
        if self.fail_publishes {
            return Err(Error::io(
                "publish scripted action",
                io::Error::other("publish disabled"),
            ));
        }
        self.published.push(action);
        Ok(())
    }
}
