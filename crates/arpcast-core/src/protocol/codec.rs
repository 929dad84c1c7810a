//! Payload codec: turns one [`InputEvent`] into the opcode-prefixed byte
//! sequence that rides after the channel and sequence bytes of a frame.
//!
//! Wire format per event kind (all single bytes):
//!
//! ```text
//! key:          [1, state, token...]      state bit 0 = pressed, bit 1 = finish
//! mouse_button: [2, pressed, token...]
//! mouse_move:   [3, x_hi, x_lo, y_hi, y_lo]   big-endian u16 coordinates
//! mouse_wheel:  [5, 0, dx, dy]                dx/dy through the signed fold
//! ```
//!
//! `token...` maps each character of the key/button token to its ordinal as
//! one byte.  Opcode 4 is unassigned; the wheel opcode has always been 5 and
//! deployed receivers depend on it.

use thiserror::Error;

use crate::protocol::event::InputEvent;

/// Opcode for a key press/release payload.
pub const OPCODE_KEY: u8 = 1;
/// Opcode for a mouse button press/release payload.
pub const OPCODE_MOUSE_BUTTON: u8 = 2;
/// Opcode for an absolute pointer move payload.
pub const OPCODE_MOUSE_MOVE: u8 = 3;
/// Opcode for a scroll wheel payload.
pub const OPCODE_MOUSE_WHEEL: u8 = 5;

/// Key state bit set while the key is pressed.
pub const KEY_STATE_PRESSED: u8 = 0x01;
/// Key state bit marking a composed/terminal key action.
pub const KEY_STATE_FINISH: u8 = 0x02;

/// Errors that can occur while encoding an event payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A key or button token contains a character whose ordinal exceeds 255
    /// and therefore cannot be carried as a single byte.
    #[error("token {token:?} contains a character that does not fit in one byte")]
    TokenNotByteSized { token: String },
}

/// Folds a signed delta into an unsigned byte using two's complement.
///
/// `-1` becomes 255, `-128` becomes 128; non-negative values keep their low
/// byte.  Only values in [-128, 127] round-trip unambiguously — a receiver
/// cannot tell `-200` from `56`.  That aliasing is a protocol limitation
/// deployed receivers already live with, so out-of-range input is folded
/// silently rather than rejected.
pub fn signed_to_byte(v: i32) -> u8 {
    if v < 0 {
        (256 + v).rem_euclid(256) as u8
    } else {
        (v % 256) as u8
    }
}

/// Encodes one event into its wire payload.
///
/// [`InputEvent::Unknown`] encodes to an empty sequence; the caller must
/// treat an empty result as "nothing to send" and skip framing entirely.
///
/// # Errors
///
/// Returns [`EncodeError::TokenNotByteSized`] when a key or button token
/// cannot be expressed as single-byte ordinals.
pub fn encode_event(event: &InputEvent) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    match event {
        InputEvent::Key { key, pressed, finish } => {
            let mut state = if *pressed { KEY_STATE_PRESSED } else { 0 };
            if *finish {
                state |= KEY_STATE_FINISH;
            }
            buf.push(OPCODE_KEY);
            buf.push(state);
            push_token(&mut buf, key)?;
        }
        InputEvent::MouseButton { button, pressed } => {
            buf.push(OPCODE_MOUSE_BUTTON);
            buf.push(u8::from(*pressed));
            push_token(&mut buf, button)?;
        }
        InputEvent::MouseMove { to } => {
            buf.push(OPCODE_MOUSE_MOVE);
            buf.extend_from_slice(&to.x.to_be_bytes());
            buf.extend_from_slice(&to.y.to_be_bytes());
        }
        InputEvent::MouseWheel { delta } => {
            buf.push(OPCODE_MOUSE_WHEEL);
            // Reserved flag slot.  Receivers expect the byte to be present;
            // its meaning was never assigned, so it stays 0 on the wire.
            buf.push(0);
            buf.push(signed_to_byte(delta.x));
            buf.push(signed_to_byte(delta.y));
        }
        InputEvent::Unknown => {}
    }
    Ok(buf)
}

/// Appends a text token as one byte per character ordinal.
fn push_token(buf: &mut Vec<u8>, token: &str) -> Result<(), EncodeError> {
    for ch in token.chars() {
        let code = ch as u32;
        if code > 0xFF {
            return Err(EncodeError::TokenNotByteSized {
                token: token.to_string(),
            });
        }
        buf.push(code as u8);
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
