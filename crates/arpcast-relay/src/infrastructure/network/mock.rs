//! Mock transmitter for unit testing.
//!
//! Records every frame handed to [`send`](super::FrameTransmitter::send) so
//! pipeline tests can assert on the exact bytes that would have hit the
//! wire, without a packet socket or elevated privileges.  Can also be
//! switched into a failing mode to exercise the drop-on-failure policy.

use std::io;
use std::sync::{Arc, Mutex};

use arpcast_core::MacAddr;

use super::{FrameTransmitter, TransmitError};

/// A mock implementation of [`FrameTransmitter`] that records sent frames.
pub struct MockTransmitter {
    mac: MacAddr,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
    failing: Arc<Mutex<bool>>,
}

impl MockTransmitter {
    /// Creates a mock with a fixed locally-administered address.
    pub fn new() -> Self {
        Self::with_hardware_address(MacAddr([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]))
    }

    /// Creates a mock reporting the given hardware address.
    pub fn with_hardware_address(mac: MacAddr) -> Self {
        Self {
            mac,
            sent: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(false)),
        }
    }

    /// Returns a copy of every frame sent so far, in order.
    pub fn sent_frames(&self) -> Vec<Vec<u8>> {
        self.sent.lock().expect("lock poisoned").clone()
    }

    /// Makes subsequent sends fail with an I/O error (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().expect("lock poisoned") = failing;
    }

    /// Returns a handle that observes this mock's recorded frames even
    /// after the mock itself is boxed into the pipeline.
    pub fn recorder(&self) -> MockRecorder {
        MockRecorder {
            sent: Arc::clone(&self.sent),
            failing: Arc::clone(&self.failing),
        }
    }
}

impl Default for MockTransmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTransmitter for MockTransmitter {
    fn hardware_address(&self) -> MacAddr {
        self.mac
    }

    fn send(&self, frame: &[u8]) -> Result<(), TransmitError> {
        if *self.failing.lock().expect("lock poisoned") {
            return Err(TransmitError::Io(io::Error::new(
                io::ErrorKind::Other,
                "mock send failure",
            )));
        }
        self.sent
            .lock()
            .expect("lock poisoned")
            .push(frame.to_vec());
        Ok(())
    }
}

/// Shared view onto a [`MockTransmitter`]'s state for assertions.
pub struct MockRecorder {
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
    failing: Arc<Mutex<bool>>,
}

impl MockRecorder {
    /// Returns a copy of every frame sent so far, in order.
    pub fn sent_frames(&self) -> Vec<Vec<u8>> {
        self.sent.lock().expect("lock poisoned").clone()
    }

    /// Makes subsequent sends fail with an I/O error (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().expect("lock poisoned") = failing;
    }
}
