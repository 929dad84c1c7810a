//! Domain state for a relay session.

pub mod session;

pub use session::{RelaySession, DEFAULT_CHANNEL};
