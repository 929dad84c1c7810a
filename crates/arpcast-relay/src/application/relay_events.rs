//! The relay pipeline: one notification in, at most one frame out.
//!
//! Each incoming message is handled to completion before the next one is
//! looked at — parse the JSON boundary text once, encode the event payload,
//! draw the `(channel, sequence)` pair from the session, build the frame,
//! and hand it to the transmitter.  No queueing, no backpressure, no retry.
//!
//! # Discard policy
//!
//! The relay is best-effort by contract: every failure mode degrades to
//! "this event is lost" and none of them surfaces to the end user.  The
//! pipeline makes each loss explicit in its [`RelayOutcome`] return value,
//! logs it at debug level, and counts it, but deliberately does not
//! propagate errors further.  Sequence state is independent of transmission
//! outcome — a failed send still consumes a sequence byte, so the receiver
//! sees the loss as a gap.

use arpcast_core::{build_frame, encode_event, EncodeError, EventParseError, InputEvent, RelaySession};
use tracing::{debug, info, trace};

use crate::infrastructure::network::{self, FrameTransmitter, TransmitError};

/// What happened to one notification message.
#[derive(Debug)]
pub enum RelayOutcome {
    /// The event was framed and left on the wire.
    Sent { sequence: u8 },
    /// The event kind carries no payload; nothing was framed and the
    /// sequence did not advance.  Not an error.
    NothingToSend,
    /// The event was lost.  The pipeline has already logged and counted it.
    Dropped(DropReason),
}

/// Why an event was lost.
#[derive(Debug)]
pub enum DropReason {
    /// The notification text could not be parsed.
    MalformedMessage(EventParseError),
    /// The event could not be expressed as wire bytes.
    Unencodable(EncodeError),
    /// Framing succeeded but transmission failed; the sequence byte the
    /// frame would have carried is consumed regardless.
    Transmit {
        sequence: u8,
        error: TransmitError,
    },
}

/// Orchestrates the encode → sequence → frame → transmit pipeline.
///
/// Owns the session state and the (optional) open transmitter.  While no
/// interface is selected every framed event is dropped with
/// [`TransmitError::InterfaceUnavailable`].
pub struct EventRelay {
    session: RelaySession,
    transmitter: Option<Box<dyn FrameTransmitter>>,
    relayed: u64,
    dropped: u64,
}

impl EventRelay {
    /// Creates a relay with no interface selected.
    pub fn new(session: RelaySession) -> Self {
        Self {
            session,
            transmitter: None,
            relayed: 0,
            dropped: 0,
        }
    }

    /// Opens the named interface and makes it the active transmitter.
    ///
    /// Replaces any previously selected interface; the old handle is closed
    /// when the old transmitter drops.
    ///
    /// # Errors
    ///
    /// Returns [`TransmitError::InterfaceUnavailable`] when the name cannot
    /// be resolved or opened.  The previous selection stays active.
    pub fn select_interface(&mut self, name: &str) -> Result<(), TransmitError> {
        let transmitter = network::open_interface(name)?;
        info!(
            "relaying on interface {name} ({})",
            transmitter.hardware_address()
        );
        self.transmitter = Some(transmitter);
        Ok(())
    }

    /// Installs a transmitter directly.  Used by tests and by callers that
    /// construct their own backend.
    pub fn set_transmitter(&mut self, transmitter: Box<dyn FrameTransmitter>) {
        self.transmitter = Some(transmitter);
    }

    /// Selects the relay channel.  Takes effect for the next framed event.
    pub fn set_channel(&self, value: u32) {
        self.session.set_channel(value);
    }

    /// The session state this relay stamps into frames.
    pub fn session(&self) -> &RelaySession {
        &self.session
    }

    /// Number of events successfully handed to the transmitter.
    pub fn relayed(&self) -> u64 {
        self.relayed
    }

    /// Number of events lost to parse, encode, or transmit failures.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Handles one serialized notification message end to end.
    pub fn handle_message(&mut self, text: &str) -> RelayOutcome {
        match InputEvent::from_json(text) {
            Ok(event) => self.relay_event(&event),
            Err(e) => {
                self.dropped += 1;
                debug!("dropping malformed event message: {e}");
                RelayOutcome::Dropped(DropReason::MalformedMessage(e))
            }
        }
    }

    /// Encodes, frames, and transmits one already-parsed event.
    pub fn relay_event(&mut self, event: &InputEvent) -> RelayOutcome {
        let payload = match encode_event(event) {
            Ok(payload) => payload,
            Err(e) => {
                self.dropped += 1;
                debug!("dropping unencodable event: {e}");
                return RelayOutcome::Dropped(DropReason::Unencodable(e));
            }
        };
        if payload.is_empty() {
            trace!("event kind carries no payload, nothing to send");
            return RelayOutcome::NothingToSend;
        }

        // The sequence advances for every framed event, success or not;
        // receivers rely on the gap to notice loss.
        let sequence = self.session.next_sequence();
        let channel = self.session.channel();

        let result = match &self.transmitter {
            Some(transmitter) => {
                let frame = build_frame(channel, sequence, &payload, transmitter.hardware_address());
                transmitter.send(&frame)
            }
            None => Err(TransmitError::InterfaceUnavailable {
                name: String::new(),
                source: None,
            }),
        };

        match result {
            Ok(()) => {
                self.relayed += 1;
                trace!("relayed event: channel {channel}, seq {sequence}");
                RelayOutcome::Sent { sequence }
            }
            Err(error) => {
                self.dropped += 1;
                debug!("dropping event after transmit failure: {error}");
                RelayOutcome::Dropped(DropReason::Transmit { sequence, error })
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::network::mock::{MockRecorder, MockTransmitter};
    use arpcast_core::MacAddr;

    const KEY_A: &str = r#"{"type":"key","state":true,"key":"a","finish":false}"#;

    fn relay_with_mock() -> (EventRelay, MockRecorder) {
        let mock = MockTransmitter::new();
        let recorder = mock.recorder();
        let mut relay = EventRelay::new(RelaySession::default());
        relay.set_transmitter(Box::new(mock));
        (relay, recorder)
    }

    #[test]
    fn test_key_event_is_framed_and_sent() {
        // Arrange
        let (mut relay, recorder) = relay_with_mock();

        // Act
        let outcome = relay.handle_message(KEY_A);

        // Assert – one frame on the wire, ending in channel, seq, payload.
        assert!(matches!(outcome, RelayOutcome::Sent { sequence: 0 }));
        let frames = recorder.sent_frames();
        assert_eq!(frames.len(), 1);
        let tail = &frames[0][frames[0].len() - 5..];
        assert_eq!(tail, &[1, 0, 1, 1, 97]);
        assert_eq!(relay.relayed(), 1);
        assert_eq!(relay.dropped(), 0);
    }

    #[test]
    fn test_frames_carry_the_transmitter_hardware_address() {
        let mac = MacAddr([0x02, 0x42, 0x42, 0x42, 0x42, 0x42]);
        let mock = MockTransmitter::with_hardware_address(mac);
        let recorder = mock.recorder();
        let mut relay = EventRelay::new(RelaySession::default());
        relay.set_transmitter(Box::new(mock));

        relay.handle_message(KEY_A);

        let frame = &recorder.sent_frames()[0];
        assert_eq!(&frame[6..12], &mac.octets(), "Ethernet source");
        assert_eq!(&frame[22..28], &mac.octets(), "sender hardware address");
    }

    #[test]
    fn test_channel_selection_lands_in_the_frame_modulo_256() {
        let (mut relay, recorder) = relay_with_mock();
        relay.set_channel(300);

        relay.handle_message(KEY_A);

        let frame = &recorder.sent_frames()[0];
        assert_eq!(frame[42], 44);
    }

    #[test]
    fn test_unknown_event_kind_sends_nothing_and_keeps_sequence() {
        // Arrange
        let (mut relay, recorder) = relay_with_mock();

        // Act
        let outcome = relay.handle_message(r#"{"type":"gesture","fingers":3}"#);

        // Assert – the transmitter was never invoked and no sequence byte
        // was consumed: the next real event still gets sequence 0.
        assert!(matches!(outcome, RelayOutcome::NothingToSend));
        assert!(recorder.sent_frames().is_empty());
        assert!(matches!(
            relay.handle_message(KEY_A),
            RelayOutcome::Sent { sequence: 0 }
        ));
    }

    #[test]
    fn test_malformed_message_is_dropped_silently() {
        let (mut relay, recorder) = relay_with_mock();

        let outcome = relay.handle_message("{{{ not json");

        assert!(matches!(
            outcome,
            RelayOutcome::Dropped(DropReason::MalformedMessage(_))
        ));
        assert!(recorder.sent_frames().is_empty());
        assert_eq!(relay.dropped(), 1);
    }

    #[test]
    fn test_non_ascii_token_is_dropped_as_unencodable() {
        let (mut relay, recorder) = relay_with_mock();

        let outcome =
            relay.handle_message(r#"{"type":"key","state":true,"key":"亜","finish":false}"#);

        assert!(matches!(
            outcome,
            RelayOutcome::Dropped(DropReason::Unencodable(_))
        ));
        assert!(recorder.sent_frames().is_empty());
    }

    #[test]
    fn test_send_failure_still_consumes_exactly_one_sequence_byte() {
        // Arrange
        let (mut relay, recorder) = relay_with_mock();
        recorder.set_failing(true);

        // Act – the send fails, then a later send succeeds.
        let failed = relay.handle_message(KEY_A);
        recorder.set_failing(false);
        let sent = relay.handle_message(KEY_A);

        // Assert – sequence 0 was consumed by the failed frame.
        assert!(matches!(
            failed,
            RelayOutcome::Dropped(DropReason::Transmit { sequence: 0, .. })
        ));
        assert!(matches!(sent, RelayOutcome::Sent { sequence: 1 }));
        assert_eq!(relay.relayed(), 1);
        assert_eq!(relay.dropped(), 1);
    }

    #[test]
    fn test_no_interface_selected_drops_with_interface_unavailable() {
        // Arrange – no transmitter installed.
        let mut relay = EventRelay::new(RelaySession::default());

        // Act
        let outcome = relay.handle_message(KEY_A);

        // Assert – dropped, and the sequence byte is consumed anyway.
        match outcome {
            RelayOutcome::Dropped(DropReason::Transmit {
                sequence: 0,
                error: TransmitError::InterfaceUnavailable { .. },
            }) => {}
            other => panic!("expected InterfaceUnavailable drop, got {other:?}"),
        }
        assert_eq!(relay.session().next_sequence(), 1);
    }

    #[test]
    fn test_select_interface_failure_keeps_relay_usable() {
        let (mut relay, recorder) = relay_with_mock();

        // A failed selection must not tear down the active transmitter.
        assert!(relay.select_interface("").is_err());
        relay.handle_message(KEY_A);

        assert_eq!(recorder.sent_frames().len(), 1);
    }

    #[test]
    fn test_wheel_event_payload_reaches_the_wire_intact() {
        let (mut relay, recorder) = relay_with_mock();

        relay.handle_message(r#"{"type":"mouse_wheel","delta":{"x":-5,"y":3}}"#);

        let frame = &recorder.sent_frames()[0];
        assert_eq!(&frame[frame.len() - 6..], &[1, 0, 5, 0, 251, 3]);
    }
}
