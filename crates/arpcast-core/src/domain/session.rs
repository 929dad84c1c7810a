//! Relay session state: the selected channel and the sequence counter.
//!
//! A session owns the two mutable values every frame is tagged with.  The
//! channel is a single-byte multiplexing identifier letting several
//! independent relays share one broadcast segment; a receiver filters on
//! the channel byte and follows that stream's sequence numbering.
//!
//! Exactly one channel is active per session — there is no per-event
//! override.  The stored value is deliberately unbounded: selection input
//! arrives from an external control as an arbitrary integer and is only
//! reduced modulo 256 when read for framing, so a receiver configured with
//! `300` and one configured with `44` meet on the same wire channel.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::protocol::sequence::SequenceCounter;

/// Channel used when no explicit selection has been made.
pub const DEFAULT_CHANNEL: u32 = 1;

/// Per-process relay state handed to the frame builder for every event.
///
/// Both fields are atomics, so a session shared behind an `Arc` hands out
/// `(channel, sequence)` pairs without locking and never reuses a sequence
/// value for two concurrent events.
#[derive(Debug)]
pub struct RelaySession {
    channel: AtomicU32,
    sequence: SequenceCounter,
}

impl RelaySession {
    /// Creates a session on the given channel with the sequence at 0.
    pub fn new(channel: u32) -> Self {
        Self {
            channel: AtomicU32::new(channel),
            sequence: SequenceCounter::new(),
        }
    }

    /// Replaces the selected channel.  The raw value is stored as-is.
    pub fn set_channel(&self, value: u32) {
        self.channel.store(value, Ordering::Relaxed);
    }

    /// The channel byte for the next frame: the stored value modulo 256.
    pub fn channel(&self) -> u8 {
        (self.channel.load(Ordering::Relaxed) % 256) as u8
    }

    /// The raw channel value as selected, before modular reduction.
    pub fn raw_channel(&self) -> u32 {
        self.channel.load(Ordering::Relaxed)
    }

    /// Draws the next sequence byte and advances the counter.
    ///
    /// Called once per framed event, whether or not the subsequent send
    /// succeeds; sequence state is independent of transmission outcome.
    pub fn next_sequence(&self) -> u8 {
        self.sequence.next()
    }
}

impl Default for RelaySession {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_uses_channel_one() {
        let session = RelaySession::default();
        assert_eq!(session.channel(), 1);
        assert_eq!(session.raw_channel(), 1);
    }

    #[test]
    fn test_channel_reduces_modulo_256_at_read_time() {
        let session = RelaySession::default();
        session.set_channel(300);
        assert_eq!(session.channel(), 44);
        assert_eq!(session.raw_channel(), 300, "the raw selection is preserved");
    }

    #[test]
    fn test_channel_values_within_byte_range_pass_through() {
        let session = RelaySession::new(0);
        assert_eq!(session.channel(), 0);
        session.set_channel(255);
        assert_eq!(session.channel(), 255);
        session.set_channel(256);
        assert_eq!(session.channel(), 0);
    }

    #[test]
    fn test_sequence_starts_at_zero_and_advances() {
        let session = RelaySession::default();
        assert_eq!(session.next_sequence(), 0);
        assert_eq!(session.next_sequence(), 1);
        assert_eq!(session.next_sequence(), 2);
    }

    #[test]
    fn test_changing_channel_does_not_reset_the_sequence() {
        let session = RelaySession::default();
        session.next_sequence();
        session.next_sequence();
        session.set_channel(9);
        assert_eq!(session.next_sequence(), 2);
    }
}
