//! Application layer: the event relay pipeline.

pub mod relay_events;

pub use relay_events::{DropReason, EventRelay, RelayOutcome};
