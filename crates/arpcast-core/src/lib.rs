//! # arpcast-core
//!
//! Shared library for ArpCast containing the input-event model, the wire
//! codec, and the relay session state.
//!
//! This crate is pure protocol: it has zero dependencies on OS APIs, UI
//! frameworks, or network sockets, so the byte-exact wire behaviour can be
//! tested without privileges or hardware.
//!
//! # Architecture overview
//!
//! ArpCast relays local keyboard and mouse activity to a receiver that
//! passively sniffs the same LAN segment.  Every event becomes one broadcast
//! Ethernet frame shaped like an ARP request; the real payload rides in the
//! bytes after the ARP header, so the receiving side never opens a socket or
//! port and the traffic blends into ordinary broadcast noise.
//!
//! This crate defines:
//!
//! - **`protocol`** – How an event becomes bytes.  The [`InputEvent`] union
//!   is decoded once from the notification text, encoded into an
//!   opcode-prefixed payload, and wrapped into a full broadcast frame.
//!
//! - **`domain`** – The [`RelaySession`]: the channel identifier and the
//!   wrapping per-event sequence counter that together tag every frame.
//!
//! The relay application (`arpcast-relay`) owns the boundary parsing loop
//! and the raw-socket transmitter; everything byte-exact lives here.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `arpcast_core::InputEvent` instead of `arpcast_core::protocol::event::InputEvent`.
pub use domain::session::RelaySession;
pub use protocol::codec::{encode_event, signed_to_byte, EncodeError};
pub use protocol::event::{EventParseError, InputEvent};
pub use protocol::frame::{build_frame, MacAddr};
pub use protocol::sequence::SequenceCounter;
