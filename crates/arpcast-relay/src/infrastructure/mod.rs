//! Infrastructure services for the relay application.
//!
//! # Sub-modules
//!
//! - **`network`** – The raw packet-socket transmitter behind the
//!   [`FrameTransmitter`](network::FrameTransmitter) seam, plus a recording
//!   mock for tests.
//!
//! - **`storage`** – TOML configuration persistence and the environment
//!   overrides the relay honours at startup.

pub mod network;
pub mod storage;
