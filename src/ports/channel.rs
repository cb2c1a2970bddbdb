//! Exchange channel port.
//!
//! The agent and the game process share no memory and no clock. Each tick the
//! agent polls for one observation and, when it has one, publishes one action.

use crate::{Result, observation::Observation, types::Action};

/// Half-duplex channel between the agent and the game process.
///
/// # Inbound
///
/// [`poll_observation`](ExchangeChannel::poll_observation) must never block
/// beyond a short, bounded settle delay. `Ok(None)` means nothing new is
/// available this tick and is the normal steady state. A consumed observation
/// is removed from the channel so it is never delivered twice.
///
/// # Outbound
///
/// [`publish_action`](ExchangeChannel::publish_action) must make the action
/// visible atomically: a reader sees either the previous complete action or
/// the new complete action, never a partial write.
///
/// # Errors
///
/// Both methods report transient I/O failures and malformed input as errors.
/// Callers are expected to log them and carry on with the next tick.
pub trait ExchangeChannel {
    /// Take the next pending observation, if any.
    fn poll_observation(&mut self) -> Result<Option<Observation>>;

    /// Publish `action` for the game process to pick up.
    fn publish_action(&mut self, action: Action) -> Result<()>;
}

impl<C: ExchangeChannel + ?Sized> ExchangeChannel for Box<C> {
    fn poll_observation(&mut self) -> Result<Option<Observation>> {
        (**self).poll_observation()
    }

    fn publish_action(&mut self, action: Action) -> Result<()> {
        (**self).publish_action(action)
    }
}
