//! Frame transmission infrastructure.
//!
//! Sending a raw Ethernet frame requires a packet socket bound to a
//! specific interface, which in turn requires elevated privileges and a
//! Linux host.  The [`FrameTransmitter`] trait keeps that concern behind a
//! seam: the production implementation is
//! [`packet_socket::PacketSocket`], and unit tests substitute
//! [`mock::MockTransmitter`] to observe exactly what would hit the wire.
//!
//! Transmission is fire-and-forget.  There is no acknowledgment, no retry,
//! and no queue; a frame either leaves the interface or the error is
//! reported to the caller, which owns the discard policy.

use arpcast_core::MacAddr;
use thiserror::Error;

pub mod mock;

#[cfg(target_os = "linux")]
pub mod packet_socket;

/// Error type for frame transmission operations.
#[derive(Debug, Error)]
pub enum TransmitError {
    /// No interface is selected, or the named interface cannot be resolved
    /// or opened.
    #[error("network interface {name:?} unavailable")]
    InterfaceUnavailable {
        name: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The platform has no raw packet-socket backend.
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),

    /// A transport-level send failure on an open interface.
    #[error("send failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait abstracting raw frame emission on one network interface.
///
/// Implementations own the open interface handle exclusively; switching
/// interfaces means replacing the transmitter object as a whole.
pub trait FrameTransmitter: Send {
    /// The hardware address of the interface frames leave from.  The frame
    /// builder stamps this into the Ethernet source and the disguised
    /// sender hardware address.
    fn hardware_address(&self) -> MacAddr;

    /// Sends one raw frame, fire-and-forget.
    ///
    /// # Errors
    ///
    /// Returns [`TransmitError::Io`] when the underlying send fails.
    fn send(&self, frame: &[u8]) -> Result<(), TransmitError>;
}

/// Opens a transmitter on the named interface.
///
/// # Errors
///
/// Returns [`TransmitError::InterfaceUnavailable`] for an empty or
/// unresolvable name, and [`TransmitError::UnsupportedPlatform`] where no
/// packet-socket backend exists.
pub fn open_interface(name: &str) -> Result<Box<dyn FrameTransmitter>, TransmitError> {
    if name.is_empty() {
        return Err(TransmitError::InterfaceUnavailable {
            name: String::new(),
            source: None,
        });
    }

    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(packet_socket::PacketSocket::open(name)?))
    }

    #[cfg(not(target_os = "linux"))]
    {
        Err(TransmitError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_interface_with_empty_name_is_unavailable() {
        let result = open_interface("");
        assert!(matches!(
            result,
            Err(TransmitError::InterfaceUnavailable { .. })
        ));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_open_interface_with_bogus_name_is_unavailable() {
        // The name lookup fails before any privileged socket call, so this
        // behaves the same with or without CAP_NET_RAW.
        let result = open_interface("arpcast-test-no-such-if0");
        assert!(matches!(
            result,
            Err(TransmitError::InterfaceUnavailable { .. })
        ));
    }
}
