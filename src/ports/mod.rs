//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the learning core and the
//! outside world: the game process on the other end of the exchange channel,
//! durable table storage, and whoever watches the loop run. Adapters in
//! [`crate::adapters`] and [`crate::pipeline::observers`] implement them.

pub mod channel;
pub mod observer;
pub mod repository;

pub use channel::ExchangeChannel;
pub use observer::{Observer, StepReport};
pub use repository::TableRepository;
