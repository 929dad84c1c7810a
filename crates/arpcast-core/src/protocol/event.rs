//! The input-event model and the JSON notification boundary.
//!
//! The interactive shell that captures keystrokes and mouse activity is a
//! separate program; it hands events to the relay as serialized JSON text.
//! Each message is a JSON object with a `"type"` field that identifies the
//! event kind.  All other fields sit in the same object:
//!
//! ```json
//! {"type":"key","state":true,"key":"a","finish":false}
//! {"type":"mouse_button","state":true,"button":"left"}
//! {"type":"mouse_move","to":{"x":300,"y":10}}
//! {"type":"mouse_wheel","delta":{"x":-5,"y":3}}
//! ```
//!
//! Serde's `#[serde(tag = "type")]` attribute handles the discriminator
//! automatically.  The message is decoded exactly once, here at the
//! boundary; downstream code matches on the closed [`InputEvent`] union and
//! never re-inspects field presence.
//!
//! Event kinds this relay does not understand (`"type"` values outside the
//! known set) parse to [`InputEvent::Unknown`], which encodes to an empty
//! payload and relays nothing.  That is deliberate: the capturing shell may
//! emit richer notifications than the wire protocol carries, and those must
//! be ignored rather than rejected.  Structurally malformed messages are a
//! parse error; the caller decides the discard policy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a notification message cannot be parsed.
#[derive(Debug, Error)]
#[error("malformed event message: {0}")]
pub struct EventParseError(#[from] serde_json::Error);

/// Absolute screen coordinates of a pointer event, as sent by the shell.
///
/// The wire format carries each coordinate as two big-endian bytes, so the
/// model stores them at exactly that width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: u16,
    pub y: u16,
}

/// Relative scroll deltas of a wheel event.
///
/// Deltas pass through the signed-byte fold in
/// [`signed_to_byte`](crate::protocol::codec::signed_to_byte); only values
/// in [-128, 127] survive the trip unambiguously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelDelta {
    pub x: i32,
    pub y: i32,
}

/// One input event captured by the interactive shell.
///
/// A closed tagged union: every event kind the wire protocol can carry has
/// a variant, and everything else lands in [`InputEvent::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// A key was pressed or released.
    Key {
        /// Short text token naming the key: a single character or a named
        /// key such as `"Enter"`.  Tokens are expected to be ASCII-range.
        key: String,
        /// `true` on press, `false` on release.
        #[serde(rename = "state")]
        pressed: bool,
        /// Marks a composed/terminal key action.
        finish: bool,
    },
    /// A mouse button was pressed or released.
    MouseButton {
        /// Short text token identifying the button, e.g. `"left"`.
        button: String,
        /// `true` on press, `false` on release.
        #[serde(rename = "state")]
        pressed: bool,
    },
    /// The pointer moved to an absolute position.
    MouseMove { to: ScreenPoint },
    /// The scroll wheel moved.
    MouseWheel { delta: WheelDelta },
    /// Any event kind this relay does not understand.  Carries no payload
    /// and is dropped without error.
    #[serde(other)]
    Unknown,
}

impl InputEvent {
    /// Parses one serialized notification message.
    ///
    /// # Errors
    ///
    /// Returns [`EventParseError`] when the text is not valid JSON or a
    /// recognized `"type"` is missing required fields.  An unrecognized
    /// `"type"` is *not* an error; it parses to [`InputEvent::Unknown`].
    pub fn from_json(text: &str) -> Result<Self, EventParseError> {
        Ok(serde_json::from_str(text)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_parses_from_shell_json() {
        // Arrange: the exact shape the capturing shell emits
        let json = r#"{"type":"key","state":true,"key":"a","finish":false}"#;

        // Act
        let event = InputEvent::from_json(json).unwrap();

        // Assert
        assert_eq!(
            event,
            InputEvent::Key {
                key: "a".to_string(),
                pressed: true,
                finish: false,
            }
        );
    }

    #[test]
    fn test_key_release_with_named_key_parses() {
        let json = r#"{"type":"key","state":false,"key":"Enter","finish":true}"#;
        let event = InputEvent::from_json(json).unwrap();
        assert_eq!(
            event,
            InputEvent::Key {
                key: "Enter".to_string(),
                pressed: false,
                finish: true,
            }
        );
    }

    #[test]
    fn test_mouse_button_event_parses() {
        let json = r#"{"type":"mouse_button","state":true,"button":"left"}"#;
        let event = InputEvent::from_json(json).unwrap();
        assert_eq!(
            event,
            InputEvent::MouseButton {
                button: "left".to_string(),
                pressed: true,
            }
        );
    }

    #[test]
    fn test_mouse_move_event_parses_nested_coordinates() {
        let json = r#"{"type":"mouse_move","to":{"x":300,"y":10}}"#;
        let event = InputEvent::from_json(json).unwrap();
        assert_eq!(
            event,
            InputEvent::MouseMove {
                to: ScreenPoint { x: 300, y: 10 },
            }
        );
    }

    #[test]
    fn test_mouse_wheel_event_parses_negative_deltas() {
        let json = r#"{"type":"mouse_wheel","delta":{"x":-5,"y":3}}"#;
        let event = InputEvent::from_json(json).unwrap();
        assert_eq!(
            event,
            InputEvent::MouseWheel {
                delta: WheelDelta { x: -5, y: 3 },
            }
        );
    }

    #[test]
    fn test_unrecognized_type_parses_to_unknown() {
        // The shell may emit event kinds the wire protocol does not carry.
        let json = r#"{"type":"pinch_zoom","scale":1.5}"#;
        let event = InputEvent::from_json(json).unwrap();
        assert_eq!(event, InputEvent::Unknown);
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let result = InputEvent::from_json("not json at all {{{");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_type_field_is_a_parse_error() {
        let result = InputEvent::from_json(r#"{"state":true,"key":"a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_known_type_with_missing_fields_is_a_parse_error() {
        // `"type":"key"` is recognized, so the remaining fields are required.
        let result = InputEvent::from_json(r#"{"type":"key","state":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_coordinate_above_u16_range_is_a_parse_error() {
        // The wire carries coordinates as two bytes; larger values cannot
        // be represented and the message is treated as malformed.
        let result = InputEvent::from_json(r#"{"type":"mouse_move","to":{"x":70000,"y":0}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_events_round_trip_through_json() {
        let events = [
            InputEvent::Key {
                key: "q".to_string(),
                pressed: true,
                finish: false,
            },
            InputEvent::MouseButton {
                button: "right".to_string(),
                pressed: false,
            },
            InputEvent::MouseMove {
                to: ScreenPoint { x: 1919, y: 1079 },
            },
            InputEvent::MouseWheel {
                delta: WheelDelta { x: 0, y: -120 },
            },
        ];
        for original in events {
            let json = serde_json::to_string(&original).unwrap();
            let decoded = InputEvent::from_json(&json).unwrap();
            assert_eq!(original, decoded);
        }
    }

    #[test]
    fn test_pressed_flag_serializes_as_state() {
        // The shell-facing field name is `state`; keep the wire shape stable.
        let event = InputEvent::MouseButton {
            button: "middle".to_string(),
            pressed: true,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""state":true"#));
        assert!(!json.contains("pressed"));
    }
}
