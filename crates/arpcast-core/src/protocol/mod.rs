//! Protocol module containing the event model, the payload codec, the
//! sequence counter, and the broadcast frame builder.

pub mod codec;
pub mod event;
pub mod frame;
pub mod sequence;

pub use codec::{encode_event, signed_to_byte, EncodeError};
pub use event::{EventParseError, InputEvent, ScreenPoint, WheelDelta};
pub use frame::{build_frame, MacAddr, BROADCAST_MAC};
pub use sequence::SequenceCounter;
