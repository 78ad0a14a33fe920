//! The relay core: the message log, the client registry and the delivery engine
//! that decides what each poll returns.

pub mod engine;
pub mod message;
pub mod session;

pub use engine::{Broker, PublishOutcome, RelayStats, SharedBroker};
